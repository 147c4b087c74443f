//! Session list fetch collaborator.

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use streamdash_model::{ServerId, Session};
use tracing::{debug, warn};
use url::Url;

use crate::error::{Result, SourceError};

/// Anything that can produce the active-session list for a server.
#[async_trait]
pub trait SessionSource: Send + Sync + Debug {
    async fn fetch_sessions(&self, server_id: ServerId) -> Result<Vec<Session>>;
}

/// Statistics API client: `GET {base}/api/Sessions?serverId={id}`.
#[derive(Clone)]
pub struct HttpSessionSource {
    client: Client,
    base_url: Url,
}

impl Debug for HttpSessionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSessionSource")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

/// Add a scheme when missing and drop trailing slashes; users routinely
/// paste `localhost:3000`.
fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let with_scheme =
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            trimmed.to_string()
        } else {
            format!("http://{trimmed}")
        };
    if with_scheme != raw {
        debug!(original = raw, normalized = %with_scheme, "normalized API base URL");
    }
    with_scheme
}

impl HttpSessionSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    pub fn with_client(client: Client, base_url: &str) -> Result<Self> {
        // Trailing slash so `join` appends instead of replacing the last
        // path segment of a prefixed deployment.
        let base_url = Url::parse(&format!("{}/", normalize_base_url(base_url)))?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn sessions_url(&self, server_id: ServerId) -> Result<Url> {
        let mut url = self.base_url.join("api/Sessions")?;
        url.query_pairs_mut()
            .append_pair("serverId", &server_id.to_string());
        Ok(url)
    }
}

#[async_trait]
impl SessionSource for HttpSessionSource {
    async fn fetch_sessions(&self, server_id: ServerId) -> Result<Vec<Session>> {
        let url = self.sessions_url(server_id)?;
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%server_id, status = status.as_u16(), "session endpoint returned an error status");
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        let sessions: Vec<Session> = serde_json::from_slice(&body)?;
        debug!(%server_id, count = sessions.len(), "fetched active sessions");
        Ok(sessions)
    }
}
