use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use streamdash_model::ServerId;
use tracing::{debug, info};

use crate::duration;
use crate::error::ConfigLoadError;
use crate::models::{ConfigOverrides, ConfigSource, DashboardConfig};

pub const CONFIG_PATH_VAR: &str = "STREAMDASH_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "STREAMDASH_CONFIG_JSON";
pub const API_URL_VAR: &str = "STREAMDASH_API_URL";
pub const SERVER_ID_VAR: &str = "STREAMDASH_SERVER_ID";
pub const SERVER_URL_VAR: &str = "STREAMDASH_SERVER_URL";
pub const POLL_INTERVAL_VAR: &str = "STREAMDASH_POLL_INTERVAL";

const DEFAULT_CONFIG_LOCATIONS: &[&str] = &[
    "streamdash.toml",
    "streamdash.json",
    "config/streamdash.toml",
    "config/streamdash.json",
];

/// Result of a successful load.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: DashboardConfig,
    pub source: ConfigSource,
    /// Environment overrides that were applied on top of `source`.
    pub overrides: ConfigOverrides,
    pub env_file_loaded: bool,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    env_file: Option<PathBuf>,
    base_dir: Option<PathBuf>,
    skip_env_file: bool,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this file and skip the env-var and default-file lookups.
    pub fn with_config_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn with_env_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.env_file = Some(path.into());
        self
    }

    /// Directory the default config locations are resolved against.
    /// Defaults to the working directory.
    pub fn with_base_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    pub fn without_env_file(mut self) -> Self {
        self.skip_env_file = true;
        self
    }

    /// Resolve against the process environment, falling back to values
    /// read from `.env`. The file never overrides a set variable and is not
    /// exported into the process environment.
    pub fn load(&self) -> Result<ConfigLoad, ConfigLoadError> {
        let env_file = self.read_env_file()?;
        let mut load = self.load_with(|name| {
            env::var(name).ok().or_else(|| {
                env_file
                    .as_ref()
                    .and_then(|values| values.get(name).cloned())
            })
        })?;
        load.env_file_loaded = env_file.is_some();
        Ok(load)
    }

    /// Resolve using `lookup` in place of the process environment.
    pub fn load_with<F>(&self, lookup: F) -> Result<ConfigLoad, ConfigLoadError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let (mut config, source) = self.resolve(&lookup)?;
        let overrides = overrides_from_env(&lookup)?;
        if !overrides.is_empty() {
            debug!(?overrides, "applying environment overrides");
            config.apply(&overrides);
        }
        config.validate()?;

        info!(
            source = %source,
            server_id = %config.server.id,
            interval = ?config.poller.interval,
            "configuration loaded"
        );

        Ok(ConfigLoad {
            config,
            source,
            overrides,
            env_file_loaded: false,
        })
    }

    fn read_env_file(&self) -> Result<Option<HashMap<String, String>>, ConfigLoadError> {
        if self.skip_env_file {
            return Ok(None);
        }
        let entries = match &self.env_file {
            Some(path) => dotenvy::from_path_iter(path),
            None => dotenvy::dotenv_iter(),
        };
        let entries = match entries {
            Ok(entries) => entries,
            Err(dotenvy::Error::Io(_)) => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let values = entries.collect::<Result<HashMap<_, _>, _>>()?;
        debug!(count = values.len(), "read env file");
        Ok(Some(values))
    }

    fn resolve(
        &self,
        lookup: &impl Fn(&str) -> Option<String>,
    ) -> Result<(DashboardConfig, ConfigSource), ConfigLoadError> {
        if let Some(path) = &self.config_path {
            let config = load_from_file(path)?;
            return Ok((config, ConfigSource::Explicit(path.clone())));
        }

        if let Some(raw) = lookup(CONFIG_PATH_VAR) {
            let path = PathBuf::from(raw.trim());
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = lookup(CONFIG_JSON_VAR) {
            let config = parse_json(&raw, CONFIG_JSON_VAR)?;
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((DashboardConfig::default(), ConfigSource::Default))
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        let base = self.base_dir.as_deref().unwrap_or(Path::new("."));
        DEFAULT_CONFIG_LOCATIONS
            .iter()
            .map(|candidate| base.join(candidate))
            .find(|path| path.is_file())
    }
}

/// Read a config file, choosing the format from its extension.
pub fn load_from_file(path: &Path) -> Result<DashboardConfig, ConfigLoadError> {
    if !path.exists() {
        return Err(ConfigLoadError::MissingConfig {
            path: path.to_path_buf(),
        });
    }
    let contents =
        fs::read_to_string(path).map_err(|source| ConfigLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    let origin = path.display().to_string();

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents, &origin),
        Some("toml") | Some("tml") => parse_toml(&contents, &origin),
        _ => parse_from_str(&contents, &origin),
    }
}

/// Try TOML first, then JSON.
pub fn parse_from_str(
    contents: &str,
    origin: &str,
) -> Result<DashboardConfig, ConfigLoadError> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            ConfigLoadError::Unrecognized {
                origin: origin.to_string(),
                toml: toml_err.to_string(),
                json: json_err.to_string(),
            }
        })
    })
}

fn parse_toml(
    contents: &str,
    origin: &str,
) -> Result<DashboardConfig, ConfigLoadError> {
    toml::from_str(contents).map_err(|source| ConfigLoadError::Toml {
        origin: origin.to_string(),
        source,
    })
}

fn parse_json(
    contents: &str,
    origin: &str,
) -> Result<DashboardConfig, ConfigLoadError> {
    serde_json::from_str(contents).map_err(|source| ConfigLoadError::Json {
        origin: origin.to_string(),
        source,
    })
}

fn overrides_from_env(
    lookup: &impl Fn(&str) -> Option<String>,
) -> Result<ConfigOverrides, ConfigLoadError> {
    let server_id = lookup(SERVER_ID_VAR)
        .map(|raw| {
            raw.parse::<ServerId>()
                .map_err(|err| ConfigLoadError::InvalidEnv {
                    name: SERVER_ID_VAR,
                    reason: err.to_string(),
                })
        })
        .transpose()?;

    let interval = lookup(POLL_INTERVAL_VAR)
        .map(|raw| {
            duration::parse(&raw).map_err(|err| ConfigLoadError::InvalidEnv {
                name: POLL_INTERVAL_VAR,
                reason: err.to_string(),
            })
        })
        .transpose()?;

    Ok(ConfigOverrides {
        api_base_url: lookup(API_URL_VAR).map(|raw| raw.trim().to_string()),
        server_id,
        server_url: lookup(SERVER_URL_VAR).map(|raw| raw.trim().to_string()),
        interval,
    })
}
