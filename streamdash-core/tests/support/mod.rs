#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt};
use streamdash_core::error::{Result, SourceError};
use streamdash_core::poller::{PollerConfig, SnapshotPoller, Ticker};
use streamdash_core::source::SessionSource;
use streamdash_model::{ServerId, Session};
use tokio::sync::{mpsc, oneshot};
use tokio_stream::wrappers::UnboundedReceiverStream;

/// One request the poller issued, waiting for the test to answer it.
#[derive(Debug)]
pub struct PendingFetch {
    pub server_id: ServerId,
    responder: oneshot::Sender<Result<Vec<Session>>>,
}

impl PendingFetch {
    /// Answer the request. Ignored if the poller has already dropped it.
    pub fn respond(self, sessions: Vec<Session>) {
        let _ = self.responder.send(Ok(sessions));
    }

    pub fn fail(self) {
        let _ = self.responder.send(Err(SourceError::Status {
            status: 502,
            url: "http://stats.test/api/Sessions".into(),
        }));
    }
}

/// Session source whose responses are supplied by the test, in any order.
#[derive(Debug)]
pub struct ScriptedSource {
    requests: mpsc::UnboundedSender<PendingFetch>,
}

#[async_trait]
impl SessionSource for ScriptedSource {
    async fn fetch_sessions(&self, server_id: ServerId) -> Result<Vec<Session>> {
        let (responder, response) = oneshot::channel();
        self.requests
            .send(PendingFetch {
                server_id,
                responder,
            })
            .map_err(|_| SourceError::Internal("test harness dropped".into()))?;
        response
            .await
            .unwrap_or_else(|_| Err(SourceError::Internal("request abandoned".into())))
    }
}

/// Ticker that fires only when the test says so.
#[derive(Debug)]
pub struct ManualTicker {
    registrations: mpsc::UnboundedSender<mpsc::UnboundedSender<()>>,
}

impl Ticker for ManualTicker {
    fn ticks(&self, _period: Duration) -> BoxStream<'static, ()> {
        let (tick, ticks) = mpsc::unbounded_channel();
        let _ = self.registrations.send(tick);
        UnboundedReceiverStream::new(ticks).boxed()
    }
}

/// Poller wired to a scripted source and a manual ticker.
pub struct PollerHarness {
    pub poller: SnapshotPoller,
    requests: mpsc::UnboundedReceiver<PendingFetch>,
    tickers: mpsc::UnboundedReceiver<mpsc::UnboundedSender<()>>,
}

impl PollerHarness {
    pub fn new() -> Self {
        let (request_tx, requests) = mpsc::unbounded_channel();
        let (ticker_tx, tickers) = mpsc::unbounded_channel();
        let config = PollerConfig {
            interval: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
        };
        let poller = SnapshotPoller::new(
            Arc::new(ScriptedSource {
                requests: request_tx,
            }),
            config,
        )
        .with_ticker(Arc::new(ManualTicker {
            registrations: ticker_tx,
        }));

        Self {
            poller,
            requests,
            tickers,
        }
    }

    /// Tick sender for the most recently spawned poll loop.
    pub async fn next_ticker(&mut self) -> mpsc::UnboundedSender<()> {
        tokio::time::timeout(Duration::from_secs(5), self.tickers.recv())
            .await
            .expect("poll loop registered a ticker")
            .expect("ticker channel open")
    }

    /// Next request reaching the source.
    pub async fn next_request(&mut self) -> PendingFetch {
        tokio::time::timeout(Duration::from_secs(5), self.requests.recv())
            .await
            .expect("poller issued a request")
            .expect("request channel open")
    }
}

pub fn session(key: &str, position_ticks: i64) -> Session {
    Session::new(key, position_ticks)
}

pub fn keys(sessions: &[Session]) -> Vec<&str> {
    sessions
        .iter()
        .map(|session| session.session_key.as_str())
        .collect()
}
