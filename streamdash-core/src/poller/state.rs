use std::sync::Arc;

use chrono::{DateTime, Utc};
use streamdash_model::{ServerId, Session};

use crate::ranking::rank_sessions;

/// Session list as of one accepted poll response.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub server_id: ServerId,
    /// Sequence number of the request that produced this snapshot.
    pub sequence: u64,
    pub received_at: DateTime<Utc>,
    /// Sessions in the order the source returned them.
    pub sessions: Vec<Session>,
}

impl Snapshot {
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn ranked(&self) -> Vec<Session> {
        rank_sessions(&self.sessions)
    }
}

/// What a consumer should render right now.
///
/// `Pending` means no response has been accepted yet for the mounted server.
/// A `Ready` snapshot with zero sessions is the distinct "nothing playing"
/// state.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SnapshotState {
    #[default]
    Pending,
    Ready(Arc<Snapshot>),
}

impl SnapshotState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SnapshotState::Pending)
    }

    pub fn snapshot(&self) -> Option<&Arc<Snapshot>> {
        match self {
            SnapshotState::Pending => None,
            SnapshotState::Ready(snapshot) => Some(snapshot),
        }
    }

    /// Ready with zero sessions.
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_some_and(|snapshot| snapshot.is_empty())
    }

    pub fn session_count(&self) -> Option<usize> {
        self.snapshot().map(|snapshot| snapshot.len())
    }
}

/// Payload of the watch channel shared between a view and its poll loop.
///
/// `generation` changes every time the view mounts a different server (or
/// unmounts). Poll loops tag their writes with the generation they were
/// started for, and writes for any other generation are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionsView {
    pub generation: u64,
    pub server_id: Option<ServerId>,
    pub state: SnapshotState,
}
