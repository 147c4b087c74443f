use streamdash_model::ServerId;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::state::{SessionsView, SnapshotState};

/// Owner of one running poll loop.
///
/// Dropping the handle cancels the loop. Responses still in flight at that
/// point are discarded.
#[derive(Debug)]
pub struct PollHandle {
    pub(crate) server_id: ServerId,
    pub(crate) receiver: watch::Receiver<SessionsView>,
    pub(crate) cancel: CancellationToken,
    pub(crate) task: Option<JoinHandle<()>>,
}

impl PollHandle {
    pub fn server_id(&self) -> ServerId {
        self.server_id
    }

    pub fn state(&self) -> SnapshotState {
        self.receiver.borrow().state.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionsView> {
        self.receiver.clone()
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancel the loop and wait for it to exit.
    pub async fn stop(mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take()
            && let Err(err) = task.await
            && !err.is_cancelled()
        {
            warn!(server_id = %self.server_id, "poll loop ended abnormally: {err}");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
