//! Playback mode classification.
//!
//! Total over every combination of optional inputs: sessions without
//! transcoding info fall back to the reported play method, and sessions
//! without either are `Unknown`.

use std::fmt::{self, Display, Formatter};

use streamdash_model::{Session, TranscodingInfo};

const UNKNOWN: &str = "Unknown";

/// How the server is delivering the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaybackMode {
    DirectPlay,
    DirectStream,
    Transcode,
    Unknown,
}

impl PlaybackMode {
    /// Map Jellyfin's `PlayMethod` vocabulary.
    pub fn from_play_method(raw: &str) -> Self {
        match raw.trim() {
            "DirectPlay" => PlaybackMode::DirectPlay,
            "DirectStream" => PlaybackMode::DirectStream,
            "Transcode" => PlaybackMode::Transcode,
            _ => PlaybackMode::Unknown,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            PlaybackMode::DirectPlay => "Direct Play",
            PlaybackMode::DirectStream => "Direct Stream",
            PlaybackMode::Transcode => "Transcode",
            PlaybackMode::Unknown => UNKNOWN,
        }
    }
}

impl Display for PlaybackMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Video codec plus delivered bitrate, e.g. `H264 - 8.0 Mbps`.
#[derive(Debug, Clone, PartialEq)]
pub struct VideoDescriptor {
    pub codec: String,
    pub bitrate_mbps: Option<f64>,
}

impl Display for VideoDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.bitrate_mbps {
            Some(mbps) => write!(f, "{} - {:.1} Mbps", self.codec, mbps),
            None => f.write_str(&self.codec),
        }
    }
}

/// Display-ready playback summary for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSummary {
    pub mode: PlaybackMode,
    /// Headline shown next to "Video:".
    pub label: String,
    pub video: Option<VideoDescriptor>,
    pub audio: String,
    /// Transcoding info present and video is not direct.
    pub transcoding: bool,
    /// Raw video codec as reported, kept for the badge wording.
    raw_video_codec: Option<String>,
}

impl PlaybackSummary {
    /// `Direct Play (H264 - 8.0 Mbps)` style line.
    pub fn video_line(&self) -> String {
        match &self.video {
            Some(video) => format!("{} ({video})", self.label),
            None => self.label.clone(),
        }
    }

    pub fn badge_text(&self) -> String {
        if self.transcoding {
            format!(
                "Transcoding ({})",
                self.raw_video_codec.as_deref().unwrap_or("unknown")
            )
        } else {
            "Direct Play".to_string()
        }
    }

    pub fn tooltip(&self) -> String {
        if self.transcoding {
            format!(
                "Transcoding video to {}",
                self.raw_video_codec.as_deref().unwrap_or("unknown")
            )
        } else {
            "Direct playing without transcoding".to_string()
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Bits per second to megabits per second, rounded half-up to one decimal.
/// Zero reads as "not reported".
fn bitrate_mbps(bitrate: Option<u64>) -> Option<f64> {
    bitrate
        .filter(|bps| *bps > 0)
        .map(|bps| (bps.saturating_add(50_000) / 100_000) as f64 / 10.0)
}

/// Classify a session's delivery from its transcoding info, falling back to
/// the reported play method.
pub fn classify(
    info: Option<&TranscodingInfo>,
    play_method: Option<&str>,
) -> PlaybackSummary {
    let play_method = non_empty(play_method);

    let (mode, label) = match info {
        Some(info) if info.is_video_direct => (
            PlaybackMode::DirectPlay,
            PlaybackMode::DirectPlay.as_str().to_string(),
        ),
        Some(_) => (
            PlaybackMode::Transcode,
            PlaybackMode::Transcode.as_str().to_string(),
        ),
        None => match play_method {
            Some(method) => {
                (PlaybackMode::from_play_method(method), method.to_string())
            }
            None => (PlaybackMode::Unknown, UNKNOWN.to_string()),
        },
    };

    let raw_video_codec = info
        .and_then(|info| non_empty(info.video_codec.as_deref()))
        .map(str::to_string);

    let video = raw_video_codec.as_ref().map(|codec| VideoDescriptor {
        codec: codec.to_uppercase(),
        bitrate_mbps: bitrate_mbps(info.and_then(|info| info.bitrate)),
    });

    let audio = info
        .and_then(|info| non_empty(info.audio_codec.as_deref()))
        .unwrap_or(UNKNOWN)
        .to_string();

    PlaybackSummary {
        mode,
        label,
        video,
        audio,
        transcoding: info.is_some_and(|info| !info.is_video_direct),
        raw_video_codec,
    }
}

/// Shorthand for [`classify`] over a whole session.
pub fn classify_session(session: &Session) -> PlaybackSummary {
    classify(
        session.transcoding_info.as_ref(),
        session.play_method.as_deref(),
    )
}
