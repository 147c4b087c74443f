//! Plain-text rendering of the dashboard for a terminal.

use std::fmt::{self, Display, Formatter};

use streamdash_core::dashboard::{DashboardView, SessionCard};
use streamdash_model::Server;

const BAR_WIDTH: usize = 20;

/// Borrowing wrapper that formats a [`DashboardView`].
#[derive(Debug)]
pub struct Rendered<'a> {
    view: &'a DashboardView,
    server: &'a Server,
}

impl<'a> Rendered<'a> {
    pub fn new(view: &'a DashboardView, server: &'a Server) -> Self {
        Self { view, server }
    }
}

pub fn render(view: &DashboardView, server: &Server) -> String {
    Rendered::new(view, server).to_string()
}

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = self.server.display_name();
        match self.view {
            DashboardView::Pending => {
                writeln!(f, "Active Sessions on {name}: loading...")
            }
            DashboardView::Empty => {
                writeln!(f, "Active Sessions on {name}")?;
                writeln!(f, "  No active sessions at the moment")
            }
            DashboardView::Sessions(cards) => {
                writeln!(f, "Active Sessions on {name} ({})", cards.len())?;
                for card in cards {
                    writeln!(f)?;
                    write_card(f, card)?;
                }
                Ok(())
            }
        }
    }
}

fn write_card(f: &mut Formatter<'_>, card: &SessionCard) -> fmt::Result {
    let state = if card.is_paused { "paused" } else { "playing" };
    write!(f, "[{state}] {}", card.title)?;
    if let Some(badge) = &card.media_badge {
        write!(f, "  <{}>", badge.label)?;
    }
    writeln!(f)?;

    if let Some(series) = &card.series_line {
        writeln!(f, "  {series}")?;
    }
    writeln!(
        f,
        "  {}  {} {}",
        card.position_label,
        progress_bar(card.progress_percent),
        card.progress_label
    )?;

    match &card.user.profile_path {
        Some(path) => writeln!(f, "  User:    {} ({path})", card.user.name)?,
        None => writeln!(f, "  User:    {}", card.user.name)?,
    }
    writeln!(f, "  Device:  {}", card.device)?;
    writeln!(f, "  Client:  {}", card.client)?;
    writeln!(
        f,
        "  Video:   {}  [{}]",
        card.playback.video_line(),
        card.playback.badge_text()
    )?;
    writeln!(f, "  Audio:   {}", card.playback.audio)?;
    writeln!(f, "  IP:      {}", card.ip_address)?;
    if let Some(activity) = &card.last_activity {
        writeln!(f, "  Last activity: {activity}")?;
    }
    if let Some(image) = card.artwork.primary() {
        writeln!(f, "  Artwork: {image}")?;
    }
    Ok(())
}

fn progress_bar(percent: f64) -> String {
    let clamped = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((clamped / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled)
    )
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use streamdash_core::artwork::ArtworkConfig;
    use streamdash_core::dashboard::build_cards;
    use streamdash_model::{ServerId, Session};

    use super::*;

    fn server() -> Server {
        Server::new(ServerId(1), "http://jf.local").with_name("Den")
    }

    #[test]
    fn pending_and_empty_read_differently() {
        let pending = render(&DashboardView::Pending, &server());
        let empty = render(&DashboardView::Empty, &server());
        assert!(pending.contains("loading"));
        assert!(empty.contains("No active sessions at the moment"));
        assert_ne!(pending, empty);
    }

    #[test]
    fn card_lists_playback_details() {
        let mut session = Session::new("k", 10);
        session.item.name = "Arrival".into();
        session.item.item_type = Some("Movie".into());
        session.progress_percent = 50.0;
        session.play_method = Some("DirectPlay".into());
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let cards = build_cards(&[session], &server(), &ArtworkConfig::default(), now);

        let text = render(&DashboardView::Sessions(cards), &server());

        assert!(text.starts_with("Active Sessions on Den (1)"));
        assert!(text.contains("[playing] Arrival  <Movie>"));
        assert!(text.contains("[##########----------] 50%"));
        assert!(text.contains("User:    Unknown User"));
        assert!(text.contains("Video:   DirectPlay  [Direct Play]"));
        assert!(text.contains("IP:      N/A"));
        assert!(!text.contains("Artwork:"));
    }

    #[test]
    fn progress_bar_clamps() {
        assert_eq!(progress_bar(-5.0), format!("[{}]", "-".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(250.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(f64::NAN), format!("[{}]", "-".repeat(BAR_WIDTH)));
    }
}
