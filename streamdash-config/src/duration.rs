//! Human-readable durations (`"500ms"`, `"5s"`) for config files.
//!
//! Serializes with `humantime`. Deserializes a humantime string, a bare
//! integer of milliseconds, or serde's native `{ secs, nanos }` form.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDuration {
    Text(String),
    Millis(u64),
    Parts { secs: u64, nanos: u32 },
}

pub fn serialize<S>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&humantime::format_duration(*value))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    match RawDuration::deserialize(deserializer)? {
        RawDuration::Text(text) => parse(&text).map_err(de::Error::custom),
        RawDuration::Millis(millis) => Ok(Duration::from_millis(millis)),
        RawDuration::Parts { secs, nanos } => Ok(Duration::new(secs, nanos)),
    }
}

pub fn parse(raw: &str) -> Result<Duration, humantime::DurationError> {
    humantime::parse_duration(raw.trim())
}
