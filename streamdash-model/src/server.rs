use crate::error::{ModelError, Result};
use crate::ids::ServerId;

/// A Jellyfin server known to the statistics API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Server {
    pub id: ServerId,
    /// Base address used to build image URLs, e.g. `https://jf.example.com`.
    pub url: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub name: Option<String>,
}

impl Server {
    pub fn new(id: ServerId, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Base URL without trailing slashes so path segments can be appended.
    pub fn base_url(&self) -> &str {
        self.url.trim().trim_end_matches('/')
    }

    /// Rejects URLs that cannot possibly address an image origin.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url();
        if base.starts_with("http://") || base.starts_with("https://") {
            Ok(())
        } else {
            Err(ModelError::InvalidServerUrl(self.url.clone()))
        }
    }

    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("server {}", self.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trims_trailing_slashes() {
        let server = Server::new(ServerId(1), "https://jf.example.com//");
        assert_eq!(server.base_url(), "https://jf.example.com");
    }

    #[test]
    fn validate_requires_http_scheme() {
        assert!(Server::new(ServerId(1), "http://localhost:8096").validate().is_ok());
        assert!(Server::new(ServerId(1), "localhost:8096").validate().is_err());
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(Server::new(ServerId(3), "http://x").display_name(), "server 3");
        assert_eq!(
            Server::new(ServerId(3), "http://x").with_name("Den").display_name(),
            "Den"
        );
    }
}
