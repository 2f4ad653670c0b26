use async_trait::async_trait;
use colloquy_core::{Action, ColloquyError, ColloquyResult, Participant, ParticipantStatus};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tracing::debug;

#[derive(Debug, Default)]
struct StatusFlags {
    disconnected: AtomicBool,
    abandoned: AtomicBool,
    returned: AtomicBool,
    expired: AtomicBool,
}

impl StatusFlags {
    fn snapshot(&self) -> ParticipantStatus {
        ParticipantStatus {
            disconnected: self.disconnected.load(Ordering::SeqCst),
            hit_is_abandoned: self.abandoned.load(Ordering::SeqCst),
            hit_is_returned: self.returned.load(Ordering::SeqCst),
            hit_is_expired: self.expired.load(Ordering::SeqCst),
        }
    }
}

/// Participant whose actions arrive on an mpsc channel and whose
/// observations leave on another. The other ends form a [`ChannelRemote`].
pub struct ChannelParticipant {
    worker_id: String,
    inbound: Mutex<mpsc::Receiver<Action>>,
    outbound: mpsc::Sender<Action>,
    flags: Arc<StatusFlags>,
    ineligible: AtomicBool,
    shut_down: AtomicBool,
}

/// Worker-side handle of a [`ChannelParticipant`].
pub struct ChannelRemote {
    worker_id: String,
    tx: mpsc::Sender<Action>,
    rx: mpsc::Receiver<Action>,
    flags: Arc<StatusFlags>,
}

impl ChannelParticipant {
    /// Create a participant and its remote with channels of `capacity` slots.
    pub fn new(worker_id: impl Into<String>, capacity: usize) -> (Self, ChannelRemote) {
        let worker_id = worker_id.into();
        let (action_tx, action_rx) = mpsc::channel(capacity);
        let (observe_tx, observe_rx) = mpsc::channel(capacity);
        let flags = Arc::new(StatusFlags::default());

        let participant = Self {
            worker_id: worker_id.clone(),
            inbound: Mutex::new(action_rx),
            outbound: observe_tx,
            flags: flags.clone(),
            ineligible: AtomicBool::new(false),
            shut_down: AtomicBool::new(false),
        };
        let remote = ChannelRemote {
            worker_id,
            tx: action_tx,
            rx: observe_rx,
            flags,
        };
        (participant, remote)
    }

    /// Whether [`Participant::mark_ineligible`] was called.
    pub fn is_ineligible(&self) -> bool {
        self.ineligible.load(Ordering::SeqCst)
    }

    /// Whether [`Participant::shutdown`] completed.
    pub fn is_shut_down(&self) -> bool {
        self.shut_down.load(Ordering::SeqCst)
    }

    fn lost(&self) -> ColloquyError {
        self.flags.disconnected.store(true, Ordering::SeqCst);
        ColloquyError::Disconnected(self.worker_id.clone())
    }
}

#[async_trait]
impl Participant for ChannelParticipant {
    fn worker_id(&self) -> &str {
        &self.worker_id
    }

    async fn act(&self, timeout: Option<Duration>) -> ColloquyResult<Action> {
        let mut inbound = self.inbound.lock().await;
        let received = match timeout {
            Some(limit) => tokio::time::timeout(limit, inbound.recv())
                .await
                .map_err(|_| ColloquyError::Timeout(self.worker_id.clone()))?,
            None => inbound.recv().await,
        };
        received.ok_or_else(|| self.lost())
    }

    async fn observe(&self, action: Action) -> ColloquyResult<()> {
        self.outbound.send(action).await.map_err(|_| self.lost())
    }

    async fn shutdown(&self, _timeout: Option<Duration>) -> ColloquyResult<()> {
        self.inbound.lock().await.close();
        self.shut_down.store(true, Ordering::SeqCst);
        debug!(worker_id = %self.worker_id, "Channel participant shut down");
        Ok(())
    }

    fn status(&self) -> ParticipantStatus {
        self.flags.snapshot()
    }

    fn mark_ineligible(&self) {
        self.ineligible.store(true, Ordering::SeqCst);
    }
}

impl ChannelRemote {
    /// Worker id of the paired participant.
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Send a ready-made action.
    pub async fn send(&self, action: Action) -> ColloquyResult<()> {
        self.tx
            .send(action)
            .await
            .map_err(|e| ColloquyError::Participant(format!("Send failed: {e}")))
    }

    /// Type a message; a trailing `[DONE]` ends the episode.
    pub async fn say(&self, text: impl Into<String>) -> ColloquyResult<()> {
        self.send(Action::from_text(self.worker_id.clone(), text)).await
    }

    /// Wait for the next observation. `None` once the participant is dropped.
    pub async fn recv(&mut self) -> Option<Action> {
        self.rx.recv().await
    }

    /// Take an observation if one is already queued.
    pub fn try_recv(&mut self) -> Option<Action> {
        self.rx.try_recv().ok()
    }

    /// Simulate a lost connection.
    pub fn disconnect(&self) {
        self.flags.disconnected.store(true, Ordering::SeqCst);
    }

    /// Simulate the worker abandoning the HIT.
    pub fn abandon(&self) {
        self.flags.abandoned.store(true, Ordering::SeqCst);
    }

    /// Simulate the worker returning the HIT.
    pub fn return_hit(&self) {
        self.flags.returned.store(true, Ordering::SeqCst);
    }

    /// Simulate the HIT expiring.
    pub fn expire(&self) {
        self.flags.expired.store(true, Ordering::SeqCst);
    }
}
