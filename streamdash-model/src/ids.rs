use crate::error::ModelError;
use std::fmt;
use std::str::FromStr;

/// Strongly typed ID for a media server registered with the statistics API.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ServerId(pub i64);

impl ServerId {
    pub const fn new(raw: i64) -> Self {
        ServerId(raw)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl From<i64> for ServerId {
    fn from(value: i64) -> Self {
        ServerId(value)
    }
}

impl FromStr for ServerId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(ServerId)
            .map_err(|_| ModelError::InvalidServerId(s.to_string()))
    }
}

impl fmt::Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a playback session within one snapshot.
///
/// The data source guarantees the key is stable across refreshes; it is the
/// only key presentation layers should use to match rows between renders.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SessionKey(pub String);

impl SessionKey {
    pub fn new(raw: impl Into<String>) -> Self {
        SessionKey(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for SessionKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SessionKey {
    fn from(value: &str) -> Self {
        SessionKey(value.to_string())
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
