use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use streamdash_core::artwork::ArtworkConfig;
use streamdash_core::poller::{
    DEFAULT_POLL_INTERVAL, DEFAULT_REQUEST_TIMEOUT, PollerConfig,
};
use streamdash_model::{Server, ServerId};

use crate::validation::{self, ConfigGuardRailError};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_SERVER_URL: &str = "http://localhost:8096";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    /// `--config` on the command line.
    Explicit(PathBuf),
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Default => f.write_str("built-in defaults"),
            ConfigSource::Explicit(path) => write!(f, "{}", path.display()),
            ConfigSource::EnvPath(path) => {
                write!(f, "{} (STREAMDASH_CONFIG_PATH)", path.display())
            }
            ConfigSource::EnvInline => f.write_str("STREAMDASH_CONFIG_JSON"),
            ConfigSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Top-level dashboard settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Origin of the statistics API that serves `/api/Sessions`.
    pub api_base_url: String,
    pub server: ServerSettings,
    pub poller: PollerSettings,
    pub artwork: ArtworkConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            server: ServerSettings::default(),
            poller: PollerSettings::default(),
            artwork: ArtworkConfig::default(),
        }
    }
}

/// The Jellyfin server whose sessions are shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub id: ServerId,
    /// Jellyfin origin used for artwork URLs.
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            id: ServerId(1),
            url: DEFAULT_SERVER_URL.to_string(),
            name: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerSettings {
    #[serde(with = "crate::duration")]
    pub interval: Duration,
    #[serde(with = "crate::duration")]
    pub request_timeout: Duration,
}

impl Default for PollerSettings {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl From<PollerSettings> for PollerConfig {
    fn from(settings: PollerSettings) -> Self {
        PollerConfig {
            interval: settings.interval,
            request_timeout: settings.request_timeout,
        }
    }
}

/// Single-value overrides layered over a loaded config, from the
/// environment or the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub api_base_url: Option<String>,
    pub server_id: Option<ServerId>,
    pub server_url: Option<String>,
    pub interval: Option<Duration>,
}

impl ConfigOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Later values win.
    pub fn merge(mut self, other: ConfigOverrides) -> Self {
        self.api_base_url = other.api_base_url.or(self.api_base_url);
        self.server_id = other.server_id.or(self.server_id);
        self.server_url = other.server_url.or(self.server_url);
        self.interval = other.interval.or(self.interval);
        self
    }
}

impl DashboardConfig {
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(url) = &overrides.api_base_url {
            self.api_base_url = url.clone();
        }
        if let Some(id) = overrides.server_id {
            self.server.id = id;
        }
        if let Some(url) = &overrides.server_url {
            self.server.url = url.clone();
        }
        if let Some(interval) = overrides.interval {
            self.poller.interval = interval;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigGuardRailError> {
        validation::validate(self)
    }

    pub fn server(&self) -> Server {
        let server = Server::new(self.server.id, self.server.url.clone());
        match &self.server.name {
            Some(name) => server.with_name(name.clone()),
            None => server,
        }
    }

    pub fn poller_config(&self) -> PollerConfig {
        self.poller.into()
    }

    /// Render as TOML, the format `config` prints.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
