//! # Streamdash Core
//!
//! Derivation pipeline behind the active-sessions dashboard.
//!
//! ## Overview
//!
//! - **Snapshot polling**: [`poller`] refreshes the session list on a fixed
//!   cadence and only ever publishes the response of the most recently issued
//!   request for the mounted server.
//! - **Ranking**: [`ranking`] imposes a deterministic total order.
//! - **Playback classification**: [`playback`] summarizes direct play vs.
//!   transcode and the codecs involved.
//! - **Artwork**: [`artwork`] picks portrait/landscape image URLs under the
//!   backdrop → thumb fallback.
//! - **Relative time**: [`time_format`] renders "last activity" strings.
//! - **Cards**: [`dashboard`] combines all of the above into per-session
//!   display records.
//!
//! Everything except [`poller`] and [`source`] is pure and synchronous.
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use streamdash_core::{
//!     poller::{ActiveSessions, PollerConfig, SnapshotPoller},
//!     source::HttpSessionSource,
//! };
//! use streamdash_model::ServerId;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PollerConfig::default();
//! let source = HttpSessionSource::new("http://localhost:3000", config.request_timeout)?;
//! let poller = SnapshotPoller::new(Arc::new(source), config);
//!
//! let mut view = ActiveSessions::new(poller);
//! view.mount(ServerId(1));
//! let mut updates = view.subscribe();
//! updates.changed().await?;
//! println!("{:?}", view.state());
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod artwork;
pub mod dashboard;
pub mod error;
pub mod playback;
pub mod poller;
pub mod ranking;
pub mod source;
pub mod time_format;

pub use artwork::{ArtworkConfig, ArtworkLayout, ArtworkSet, resolve_artwork};
pub use dashboard::{DashboardView, SessionCard, build_cards};
pub use error::{Result, SourceError};
pub use playback::{PlaybackMode, PlaybackSummary, VideoDescriptor, classify};
pub use poller::{
    ActiveSessions, PollHandle, PollerConfig, Snapshot, SnapshotPoller,
    SnapshotState,
};
pub use ranking::rank_sessions;
pub use source::{HttpSessionSource, SessionSource};
pub use time_format::format_relative;
