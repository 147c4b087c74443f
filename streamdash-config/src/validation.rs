use std::time::Duration;

use streamdash_model::FillSize;
use thiserror::Error;
use url::Url;

use crate::models::DashboardConfig;

/// Poll faster than this and the statistics API spends its time on us.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("poll interval {0:?} is below the 50ms minimum")]
    IntervalTooShort(Duration),
    #[error("request timeout must be greater than zero")]
    ZeroRequestTimeout,
    #[error("artwork quality {0} is outside 1..=100")]
    QualityOutOfRange(u8),
    #[error("artwork {field} must have a non-zero width and height")]
    EmptyFill { field: &'static str },
    #[error("{field} '{value}' is not a usable URL: {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },
}

pub fn validate(config: &DashboardConfig) -> Result<(), ConfigGuardRailError> {
    if config.poller.interval < MIN_POLL_INTERVAL {
        return Err(ConfigGuardRailError::IntervalTooShort(
            config.poller.interval,
        ));
    }
    if config.poller.request_timeout.is_zero() {
        return Err(ConfigGuardRailError::ZeroRequestTimeout);
    }

    let artwork = &config.artwork;
    if !(1..=100).contains(&artwork.quality) {
        return Err(ConfigGuardRailError::QualityOutOfRange(artwork.quality));
    }
    check_fill("portrait_fill", artwork.portrait_fill)?;
    check_fill("landscape_fill", artwork.landscape_fill)?;

    check_url("api_base_url", &config.api_base_url)?;
    config.server().validate().map_err(|err| {
        ConfigGuardRailError::InvalidUrl {
            field: "server.url",
            value: config.server.url.clone(),
            reason: err.to_string(),
        }
    })?;

    Ok(())
}

fn check_fill(
    field: &'static str,
    fill: FillSize,
) -> Result<(), ConfigGuardRailError> {
    if fill.is_empty() {
        return Err(ConfigGuardRailError::EmptyFill { field });
    }
    Ok(())
}

/// The session client adds `http://` to bare hosts, so accept those too.
fn check_url(field: &'static str, raw: &str) -> Result<(), ConfigGuardRailError> {
    let trimmed = raw.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{trimmed}")
    };

    match Url::parse(&candidate) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        Ok(url) => Err(ConfigGuardRailError::InvalidUrl {
            field,
            value: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(err) => Err(ConfigGuardRailError::InvalidUrl {
            field,
            value: raw.to_string(),
            reason: err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_floor_is_enforced() {
        let mut config = DashboardConfig::default();
        config.poller.interval = Duration::from_millis(10);
        assert_eq!(
            validate(&config),
            Err(ConfigGuardRailError::IntervalTooShort(Duration::from_millis(10)))
        );

        config.poller.interval = MIN_POLL_INTERVAL;
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn artwork_limits() {
        let mut config = DashboardConfig::default();
        config.artwork.quality = 0;
        assert_eq!(
            validate(&config),
            Err(ConfigGuardRailError::QualityOutOfRange(0))
        );

        let mut config = DashboardConfig::default();
        config.artwork.landscape_fill = FillSize::new(0, 400);
        assert_eq!(
            validate(&config),
            Err(ConfigGuardRailError::EmptyFill {
                field: "landscape_fill"
            })
        );
    }

    #[test]
    fn urls_must_be_http() {
        let mut config = DashboardConfig::default();
        config.api_base_url = "localhost:3000".into();
        assert!(validate(&config).is_ok());

        config.api_base_url = "ftp://stats.example.com".into();
        assert!(matches!(
            validate(&config),
            Err(ConfigGuardRailError::InvalidUrl {
                field: "api_base_url",
                ..
            })
        ));

        let mut config = DashboardConfig::default();
        config.server.url = "jf.example.com".into();
        assert!(matches!(
            validate(&config),
            Err(ConfigGuardRailError::InvalidUrl {
                field: "server.url",
                ..
            })
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = DashboardConfig::default();
        config.poller.request_timeout = Duration::ZERO;
        assert_eq!(validate(&config), Err(ConfigGuardRailError::ZeroRequestTimeout));
    }
}
