use crate::action::Action;
use crate::error::ColloquyResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Disconnect-type flags of a participant, inspected when a session is saved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantStatus {
    /// The connection to the worker was lost.
    pub disconnected: bool,
    /// The worker abandoned the HIT.
    pub hit_is_abandoned: bool,
    /// The worker returned the HIT.
    pub hit_is_returned: bool,
    /// The HIT expired before completion.
    pub hit_is_expired: bool,
}

impl ParticipantStatus {
    /// True when any flag says the worker failed to complete the task.
    pub fn failed_to_complete(&self) -> bool {
        self.disconnected || self.hit_is_abandoned || self.hit_is_returned || self.hit_is_expired
    }
}

/// A remote worker taking part in a task.
///
/// Implementations that cannot honour a timeout return
/// [`ColloquyError::Unsupported`](crate::ColloquyError::Unsupported) when one
/// is given; worlds then retry the call with `None`.
#[async_trait]
pub trait Participant: Send + Sync {
    /// Platform identifier of the worker.
    fn worker_id(&self) -> &str;

    /// Block until the participant produces its next action.
    async fn act(&self, timeout: Option<Duration>) -> ColloquyResult<Action>;

    /// Deliver an action produced by someone else.
    async fn observe(&self, action: Action) -> ColloquyResult<()>;

    /// Release the participant.
    async fn shutdown(&self, timeout: Option<Duration>) -> ColloquyResult<()>;

    /// Current disconnect-type flags.
    fn status(&self) -> ParticipantStatus;

    /// Flag the participant's work as not eligible for reward.
    fn mark_ineligible(&self);
}
