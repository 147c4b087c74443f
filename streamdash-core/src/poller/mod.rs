//! Periodic session polling with last-issued-wins ordering.
//!
//! A [`SnapshotPoller`] issues one request per tick without waiting for the
//! previous one to finish. Requests are numbered by a [`SequenceGate`] and a
//! response only replaces the published snapshot when no later-issued
//! request has already been applied. Failed or timed out requests leave the
//! current snapshot untouched.

mod handle;
mod sequence;
mod state;
mod ticker;
mod view;

pub use handle::PollHandle;
pub use sequence::SequenceGate;
pub use state::{SessionsView, Snapshot, SnapshotState};
pub use ticker::{IntervalTicker, Ticker};
pub use view::ActiveSessions;

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::future::BoxFuture;
use futures::stream::{BoxStream, FuturesUnordered, StreamExt};
use streamdash_model::{ServerId, Session};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{Result, SourceError};
use crate::source::SessionSource;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// Time between request issues.
    pub interval: Duration,
    /// A request still running after this long counts as failed.
    pub request_timeout: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SnapshotPoller {
    source: Arc<dyn SessionSource>,
    ticker: Arc<dyn Ticker>,
    config: PollerConfig,
}

impl SnapshotPoller {
    pub fn new(source: Arc<dyn SessionSource>, config: PollerConfig) -> Self {
        Self {
            source,
            ticker: Arc::new(IntervalTicker),
            config,
        }
    }

    pub fn with_ticker(mut self, ticker: Arc<dyn Ticker>) -> Self {
        self.ticker = ticker;
        self
    }

    pub fn config(&self) -> &PollerConfig {
        &self.config
    }

    /// Start polling `server_id` on a private channel.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(&self, server_id: ServerId) -> PollHandle {
        let (sender, _receiver) = watch::channel(SessionsView {
            generation: 0,
            server_id: Some(server_id),
            state: SnapshotState::Pending,
        });
        self.spawn_on(Arc::new(sender), 0, server_id)
    }

    pub(crate) fn spawn_on(
        &self,
        channel: Arc<watch::Sender<SessionsView>>,
        generation: u64,
        server_id: ServerId,
    ) -> PollHandle {
        let cancel = CancellationToken::new();
        let receiver = channel.subscribe();
        let ticks = self.ticker.ticks(self.config.interval);
        let poll_loop = PollLoop {
            source: Arc::clone(&self.source),
            server_id,
            generation,
            request_timeout: self.config.request_timeout,
            channel,
        };
        let task = tokio::spawn(poll_loop.run(ticks, cancel.clone()));

        PollHandle {
            server_id,
            receiver,
            cancel,
            task: Some(task),
        }
    }
}

type Inflight = FuturesUnordered<BoxFuture<'static, (u64, Result<Vec<Session>>)>>;

struct PollLoop {
    source: Arc<dyn SessionSource>,
    server_id: ServerId,
    generation: u64,
    request_timeout: Duration,
    channel: Arc<watch::Sender<SessionsView>>,
}

impl PollLoop {
    async fn run(self, mut ticks: BoxStream<'static, ()>, cancel: CancellationToken) {
        info!(server_id = %self.server_id, "session polling started");

        let mut progress = PollProgress::default();
        let mut inflight: Inflight = FuturesUnordered::new();
        let mut ticks_done = false;

        loop {
            tokio::select! {
                biased;

                _ = cancel.cancelled() => break,

                Some((sequence, outcome)) = inflight.next(), if !inflight.is_empty() => {
                    self.complete(&mut progress, sequence, outcome);
                }

                tick = ticks.next(), if !ticks_done => match tick {
                    Some(()) => {
                        let sequence = progress.gate.issue();
                        debug!(server_id = %self.server_id, sequence, "issuing session request");
                        inflight.push(self.request(sequence));
                    }
                    None => ticks_done = true,
                },

                else => break,
            }
        }

        info!(
            server_id = %self.server_id,
            abandoned = inflight.len(),
            "session polling stopped"
        );
    }

    fn request(&self, sequence: u64) -> BoxFuture<'static, (u64, Result<Vec<Session>>)> {
        let source = Arc::clone(&self.source);
        let server_id = self.server_id;
        let limit = self.request_timeout;
        Box::pin(async move {
            let outcome = match tokio::time::timeout(limit, source.fetch_sessions(server_id)).await
            {
                Ok(result) => result,
                Err(_) => Err(SourceError::Timeout(limit)),
            };
            (sequence, outcome)
        })
    }

    fn complete(
        &self,
        progress: &mut PollProgress,
        sequence: u64,
        outcome: Result<Vec<Session>>,
    ) {
        let sessions = match progress.settle(sequence, outcome) {
            Settled::Apply {
                sessions,
                recovered_after,
            } => {
                if recovered_after > 0 {
                    info!(
                        server_id = %self.server_id,
                        failures = recovered_after,
                        "session polling recovered"
                    );
                }
                sessions
            }
            Settled::Failed(err) => {
                warn!(
                    server_id = %self.server_id,
                    sequence,
                    failures = progress.consecutive_failures,
                    "session request failed, keeping previous snapshot: {err}"
                );
                return;
            }
            Settled::Superseded => {
                debug!(
                    server_id = %self.server_id,
                    sequence,
                    applied = ?progress.gate.last_applied(),
                    "discarding superseded session response"
                );
                return;
            }
        };

        let snapshot = Snapshot {
            server_id: self.server_id,
            sequence,
            received_at: Utc::now(),
            sessions,
        };
        if !publish(&self.channel, self.generation, SnapshotState::Ready(Arc::new(snapshot))) {
            debug!(server_id = %self.server_id, sequence, "view moved on, snapshot dropped");
        }
    }
}

/// Ordering gate plus the failure streak of one poll loop.
#[derive(Debug, Default)]
struct PollProgress {
    gate: SequenceGate,
    consecutive_failures: u32,
}

#[derive(Debug)]
enum Settled {
    Apply {
        sessions: Vec<Session>,
        /// Failure streak this success ended; zero when there was none.
        recovered_after: u32,
    },
    Failed(SourceError),
    Superseded,
}

impl PollProgress {
    /// Superseded responses are dropped before they can touch the streak,
    /// successes and failures alike.
    fn settle(&mut self, sequence: u64, outcome: Result<Vec<Session>>) -> Settled {
        if self.gate.is_superseded(sequence) {
            return Settled::Superseded;
        }
        match outcome {
            Err(err) => {
                self.consecutive_failures += 1;
                Settled::Failed(err)
            }
            Ok(sessions) => {
                if !self.gate.accept(sequence) {
                    return Settled::Superseded;
                }
                Settled::Apply {
                    sessions,
                    recovered_after: std::mem::take(&mut self.consecutive_failures),
                }
            }
        }
    }
}

/// Write `state` only while the channel still belongs to `generation`.
fn publish(
    channel: &watch::Sender<SessionsView>,
    generation: u64,
    state: SnapshotState,
) -> bool {
    channel.send_if_modified(|view| {
        if view.generation != generation {
            return false;
        }
        view.state = state;
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_polls_twice_a_second() {
        let config = PollerConfig::default();
        assert_eq!(config.interval, Duration::from_millis(500));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    fn failed() -> Result<Vec<Session>> {
        Err(SourceError::Status {
            status: 502,
            url: "http://stats.test/api/Sessions".into(),
        })
    }

    #[test]
    fn stale_failure_leaves_streak_alone() {
        let mut progress = PollProgress::default();
        let older = progress.gate.issue();
        let newer = progress.gate.issue();

        assert!(matches!(
            progress.settle(newer, Ok(Vec::new())),
            Settled::Apply { recovered_after: 0, .. }
        ));
        assert!(matches!(progress.settle(older, failed()), Settled::Superseded));
        assert_eq!(progress.consecutive_failures, 0);
    }

    #[test]
    fn success_reports_the_streak_it_ends() {
        let mut progress = PollProgress::default();
        let first = progress.gate.issue();
        let second = progress.gate.issue();
        let third = progress.gate.issue();

        assert!(matches!(progress.settle(first, failed()), Settled::Failed(_)));
        assert!(matches!(progress.settle(second, failed()), Settled::Failed(_)));
        assert_eq!(progress.consecutive_failures, 2);

        assert!(matches!(
            progress.settle(third, Ok(Vec::new())),
            Settled::Apply { recovered_after: 2, .. }
        ));
        assert_eq!(progress.consecutive_failures, 0);
    }

    #[test]
    fn publish_ignores_stale_generation() {
        let (sender, receiver) = watch::channel(SessionsView {
            generation: 2,
            server_id: Some(ServerId(2)),
            state: SnapshotState::Pending,
        });
        let stale = SnapshotState::Ready(Arc::new(Snapshot {
            server_id: ServerId(1),
            sequence: 1,
            received_at: Utc::now(),
            sessions: Vec::new(),
        }));

        assert!(!publish(&sender, 1, stale.clone()));
        assert!(receiver.borrow().state.is_pending());

        assert!(publish(&sender, 2, stale));
        assert!(!receiver.borrow().state.is_pending());
    }
}
