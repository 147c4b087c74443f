//! Session cards: the display records handed to a presentation layer.

use chrono::{DateTime, Utc};
use streamdash_model::{ItemKind, Server, Session, SessionKey, SessionUser};

use crate::artwork::{ArtworkConfig, ArtworkSet, resolve_artwork};
use crate::playback::{PlaybackSummary, classify_session};
use crate::poller::SnapshotState;
use crate::ranking::rank_sessions;
use crate::time_format::format_relative;

pub const UNKNOWN_USER: &str = "Unknown User";
pub const MISSING_IP: &str = "N/A";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeIcon {
    Film,
    Tv,
}

/// Media type badge; movies get a film icon, everything else a TV icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaBadge {
    pub label: String,
    pub icon: BadgeIcon,
}

impl MediaBadge {
    fn for_kind(kind: &ItemKind) -> Self {
        let icon = match kind {
            ItemKind::Movie => BadgeIcon::Film,
            _ => BadgeIcon::Tv,
        };
        Self {
            label: kind.as_str().to_string(),
            icon,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserLabel {
    pub name: String,
    /// `/servers/{server}/users/{user}`; absent for anonymous sessions.
    pub profile_path: Option<String>,
}

impl UserLabel {
    fn resolve(user: Option<&SessionUser>, server: &Server) -> Self {
        let Some(user) = user else {
            return Self {
                name: UNKNOWN_USER.to_string(),
                profile_path: None,
            };
        };

        let profile_path = user
            .jellyfin_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("/servers/{}/users/{}", server.id, id));
        let name = user
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_USER.to_string());

        Self { name, profile_path }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionCard {
    pub key: SessionKey,
    pub title: String,
    pub media_badge: Option<MediaBadge>,
    /// `Series - S1:E2`, or just the series name when numbering is missing.
    pub series_line: Option<String>,
    /// `12:04 / 1:42:10`
    pub position_label: String,
    pub progress_percent: f64,
    pub progress_label: String,
    pub is_paused: bool,
    pub user: UserLabel,
    pub device: String,
    pub client: String,
    pub playback: PlaybackSummary,
    pub ip_address: String,
    /// `Last activity` text; absent when the session never reported one.
    pub last_activity: Option<String>,
    pub artwork: ArtworkSet,
}

impl SessionCard {
    pub fn build(
        session: &Session,
        server: &Server,
        artwork: &ArtworkConfig,
        now: DateTime<Utc>,
    ) -> Self {
        let item = &session.item;

        let series_line = item
            .series_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .map(|series| match item.episode_code() {
                Some(code) => format!("{series} - {code}"),
                None => series.to_string(),
            });

        Self {
            key: session.session_key.clone(),
            title: item.name.clone(),
            media_badge: item.kind().as_ref().map(MediaBadge::for_kind),
            series_line,
            position_label: format!(
                "{} / {}",
                session.formatted_position, session.formatted_runtime
            ),
            progress_percent: session.progress_percent,
            progress_label: progress_label(session.progress_percent),
            is_paused: session.is_paused,
            user: UserLabel::resolve(session.user.as_ref(), server),
            device: session.device_name.clone(),
            client: session.client.clone(),
            playback: classify_session(session),
            ip_address: session
                .ip_address
                .clone()
                .filter(|ip| !ip.is_empty())
                .unwrap_or_else(|| MISSING_IP.to_string()),
            last_activity: session
                .last_activity_date
                .map(|at| format_relative(at, now)),
            artwork: resolve_artwork(item, server, artwork),
        }
    }
}

/// Whole percent, rounded half-up. Out-of-range input is shown as given.
fn progress_label(percent: f64) -> String {
    if !percent.is_finite() {
        return "0%".to_string();
    }
    format!("{}%", (percent + 0.5).floor() as i64)
}

/// Rank `sessions` and build one card per session.
pub fn build_cards(
    sessions: &[Session],
    server: &Server,
    artwork: &ArtworkConfig,
    now: DateTime<Utc>,
) -> Vec<SessionCard> {
    rank_sessions(sessions)
        .iter()
        .map(|session| SessionCard::build(session, server, artwork, now))
        .collect()
}

/// What the panel shows for a given poller state.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardView {
    /// No response yet for this server.
    Pending,
    /// "No active sessions at the moment"
    Empty,
    Sessions(Vec<SessionCard>),
}

impl DashboardView {
    pub fn from_state(
        state: &SnapshotState,
        server: &Server,
        artwork: &ArtworkConfig,
        now: DateTime<Utc>,
    ) -> Self {
        match state.snapshot() {
            None => DashboardView::Pending,
            Some(snapshot) if snapshot.is_empty() => DashboardView::Empty,
            Some(snapshot) => DashboardView::Sessions(build_cards(
                &snapshot.sessions,
                server,
                artwork,
                now,
            )),
        }
    }

    pub fn cards(&self) -> &[SessionCard] {
        match self {
            DashboardView::Sessions(cards) => cards,
            _ => &[],
        }
    }
}
