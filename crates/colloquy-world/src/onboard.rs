use crate::config::OnboardingConfig;
use crate::teardown::act_with_fallback;
use colloquy_core::{Action, ColloquyResult, Participant};
use std::sync::Arc;
use tracing::{debug, info};

/// Welcomes one worker before pairing: greeting, one reply, closing note.
///
/// The reply is not validated.
pub struct OnboardWorld {
    participant: Arc<dyn Participant>,
    messages: OnboardingConfig,
    episode_done: bool,
}

impl OnboardWorld {
    /// Create a world for `participant`.
    pub fn new(participant: Arc<dyn Participant>, messages: OnboardingConfig) -> Self {
        Self {
            participant,
            messages,
            episode_done: false,
        }
    }

    /// Run the whole onboarding exchange.
    pub async fn parley(&mut self) -> ColloquyResult<()> {
        self.participant
            .observe(Action::system(self.messages.greeting.clone()))
            .await?;
        let reply = act_with_fallback(self.participant.as_ref(), None).await?;
        debug!(
            worker_id = %self.participant.worker_id(),
            chars = reply.text.len(),
            "Onboarding reply"
        );
        self.participant
            .observe(Action::system(self.messages.closing.clone()))
            .await?;
        self.episode_done = true;
        info!(worker_id = %self.participant.worker_id(), "Onboarding complete");
        Ok(())
    }

    /// Whether the exchange finished.
    pub fn episode_done(&self) -> bool {
        self.episode_done
    }

    /// Release the world. The participant stays connected for pairing.
    pub fn shutdown(&self) {
        debug!(worker_id = %self.participant.worker_id(), "Onboarding world closed");
    }
}
