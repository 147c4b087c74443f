use crate::chrono::{DateTime, Utc};
use crate::ids::SessionKey;
use crate::item::Item;

/// One playback instance as reported by the statistics API.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Session {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub session_key: SessionKey,
    /// Playback offset in 100ns ticks; only ever grows within one session.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::ticks")
    )]
    pub position_ticks: i64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub formatted_position: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub formatted_runtime: String,
    /// Clamped to 0..=100 upstream. Never re-clamped here.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub progress_percent: f64,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub is_paused: bool,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub device_name: String,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub client: String,
    pub ip_address: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::timestamp::lenient")
    )]
    pub last_activity_date: Option<DateTime<Utc>>,
    pub play_method: Option<String>,
    pub transcoding_info: Option<TranscodingInfo>,
    pub user: Option<SessionUser>,
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub item: Item,
}

/// Transcoding parameters reported alongside an active session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscodingInfo {
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::or_default")
    )]
    pub is_video_direct: bool,
    pub video_codec: Option<String>,
    pub audio_codec: Option<String>,
    /// Bits per second.
    #[cfg_attr(
        feature = "serde",
        serde(deserialize_with = "crate::lenient::bitrate")
    )]
    pub bitrate: Option<u64>,
}

/// Reference to the user that owns a session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionUser {
    pub jellyfin_id: Option<String>,
    pub name: Option<String>,
}

impl Session {
    pub fn new(key: impl Into<String>, position_ticks: i64) -> Self {
        Self {
            session_key: SessionKey::new(key),
            position_ticks,
            ..Self::default()
        }
    }

    /// Whether the server reports active video transcoding.
    pub fn is_transcoding(&self) -> bool {
        self.transcoding_info
            .as_ref()
            .is_some_and(|info| !info.is_video_direct)
    }
}
