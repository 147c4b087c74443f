use std::sync::Arc;

use streamdash_model::ServerId;
use tokio::sync::watch;
use tracing::info;

use super::handle::PollHandle;
use super::state::{SessionsView, SnapshotState};
use super::SnapshotPoller;

/// The active sessions view: one mounted server at a time.
///
/// Consumers subscribe once and keep their receiver across server switches.
/// Switching servers cancels the old loop, resets the state to pending and
/// starts a new loop; anything the old loop still produces is dropped.
#[derive(Debug)]
pub struct ActiveSessions {
    poller: SnapshotPoller,
    channel: Arc<watch::Sender<SessionsView>>,
    generation: u64,
    current: Option<PollHandle>,
}

impl ActiveSessions {
    pub fn new(poller: SnapshotPoller) -> Self {
        let (sender, _receiver) = watch::channel(SessionsView::default());
        Self {
            poller,
            channel: Arc::new(sender),
            generation: 0,
            current: None,
        }
    }

    /// Start polling `server_id`. Mounting the server that is already
    /// mounted keeps the running loop and its snapshot.
    pub fn mount(&mut self, server_id: ServerId) {
        if self.server_id() == Some(server_id) {
            return;
        }
        self.replace(Some(server_id));
    }

    pub fn switch_server(&mut self, server_id: ServerId) {
        if let Some(previous) = self.server_id()
            && previous != server_id
        {
            info!(from = %previous, to = %server_id, "switching session view");
        }
        self.mount(server_id);
    }

    /// Stop polling and forget the current snapshot.
    pub fn unmount(&mut self) {
        if self.current.is_some() {
            self.replace(None);
        }
    }

    pub fn server_id(&self) -> Option<ServerId> {
        self.current.as_ref().map(PollHandle::server_id)
    }

    pub fn state(&self) -> SnapshotState {
        self.channel.borrow().state.clone()
    }

    pub fn view(&self) -> SessionsView {
        self.channel.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionsView> {
        self.channel.subscribe()
    }

    fn replace(&mut self, next: Option<ServerId>) {
        if let Some(previous) = self.current.take() {
            previous.cancel();
        }

        self.generation += 1;
        self.channel.send_replace(SessionsView {
            generation: self.generation,
            server_id: next,
            state: SnapshotState::Pending,
        });

        self.current = next.map(|server_id| {
            self.poller
                .spawn_on(Arc::clone(&self.channel), self.generation, server_id)
        });
    }
}
