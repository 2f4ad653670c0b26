use colloquy_core::{Action, ColloquyResult, Participant};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Ask a participant for its next action, retrying without the timeout when
/// the participant does not accept one.
pub async fn act_with_fallback(
    participant: &dyn Participant,
    timeout: Option<Duration>,
) -> ColloquyResult<Action> {
    match participant.act(timeout).await {
        Err(e) if e.is_unsupported() && timeout.is_some() => {
            debug!(
                worker_id = %participant.worker_id(),
                "act timeout unsupported, retrying without"
            );
            participant.act(None).await
        }
        other => other,
    }
}

async fn shutdown_one(participant: Arc<dyn Participant>, timeout: Option<Duration>) {
    let result = match participant.shutdown(timeout).await {
        Err(e) if e.is_unsupported() && timeout.is_some() => participant.shutdown(None).await,
        other => other,
    };
    if let Err(e) = result {
        warn!(worker_id = %participant.worker_id(), error = %e, "Participant shutdown failed");
    }
}

/// Shut every participant down concurrently, one task each, so a stuck
/// participant cannot hold up the others. Failures are logged and dropped.
pub async fn shutdown_all(participants: &[Arc<dyn Participant>], timeout: Option<Duration>) {
    let mut tasks = JoinSet::new();
    for participant in participants {
        tasks.spawn(shutdown_one(participant.clone(), timeout));
    }
    while let Some(joined) = tasks.join_next().await {
        if let Err(e) = joined {
            warn!(error = %e, "Participant shutdown task aborted");
        }
    }
}
