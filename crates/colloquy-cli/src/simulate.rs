//! Scripted workers for dry runs without real participants.

use colloquy_channels::{ChannelParticipant, ChannelRemote};
use colloquy_core::{ColloquyResult, Participant};
use std::sync::Arc;
use tracing::debug;

/// Two channel participants with their scripts queued.
///
/// The first worker ends the conversation with its last line; with
/// `drop_out` the second worker returns its HIT.
pub async fn scripted_pair(
    lines: usize,
    drop_out: bool,
) -> ColloquyResult<[Arc<dyn Participant>; 2]> {
    let capacity = lines + 4;
    let (first, first_remote) = ChannelParticipant::new("worker_1", capacity);
    let (second, second_remote) = ChannelParticipant::new("worker_2", capacity);

    first_remote.say("Hi, I'm the first worker.").await?;
    second_remote.say("Hi, I'm the second worker.").await?;
    for i in 1..=lines {
        let closing = if i == lines { " [DONE]" } else { "" };
        first_remote
            .say(format!("Line {i} from worker_1.{closing}"))
            .await?;
        second_remote.say(format!("Reply {i} from worker_2.")).await?;
    }
    if drop_out {
        second_remote.return_hit();
    }

    tokio::spawn(drain(first_remote));
    tokio::spawn(drain(second_remote));
    Ok([Arc::new(first), Arc::new(second)])
}

async fn drain(mut remote: ChannelRemote) {
    while let Some(action) = remote.recv().await {
        debug!(worker_id = %remote.worker_id(), from = %action.id, text = %action.text, "Observed");
    }
}
