use crate::config::{OnboardingConfig, TaskConfig};
use crate::dialog::DialogWorld;
use crate::onboard::OnboardWorld;
use crate::teardown::shutdown_all;
use colloquy_core::{ColloquyResult, Participant};
use colloquy_session::{OutcomeRecord, OutcomeStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// Result of a finished conversation.
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// The persisted record.
    pub outcome: OutcomeRecord,
    /// Where it was written.
    pub path: PathBuf,
    /// Turns taken, including the one that ended the episode.
    pub turns: u32,
}

/// Runs a paired dialogue task end to end: onboarding, conversation,
/// persistence and teardown.
pub struct DialogTask {
    config: TaskConfig,
    onboarding: OnboardingConfig,
    store: Arc<dyn OutcomeStore>,
}

impl DialogTask {
    /// Create a task writing outcomes to `store`.
    pub fn new(
        config: TaskConfig,
        onboarding: OnboardingConfig,
        store: Arc<dyn OutcomeStore>,
    ) -> Self {
        Self {
            config,
            onboarding,
            store,
        }
    }

    /// Task settings.
    pub fn config(&self) -> &TaskConfig {
        &self.config
    }

    /// Onboard a single worker.
    pub async fn run_onboard(&self, participant: Arc<dyn Participant>) -> ColloquyResult<()> {
        let mut world = OnboardWorld::new(participant, self.onboarding.clone());
        while !world.episode_done() {
            world.parley().await?;
        }
        world.shutdown();
        Ok(())
    }

    /// Converse until a participant signals the end or the turn budget runs
    /// out, then save the outcome and shut the pair down.
    ///
    /// If a turn fails the pair is still shut down, nothing is saved, and the
    /// error is returned.
    pub async fn run_conversation(
        &self,
        participants: Vec<Arc<dyn Participant>>,
    ) -> ColloquyResult<SessionSummary> {
        let mut world = DialogWorld::new(participants, &self.config)?;
        info!(
            session_id = %world.session_id(),
            kind = %world.session_kind(),
            max_turns = self.config.max_turns,
            "Conversation started"
        );

        while !world.episode_done() && world.turns() < self.config.max_turns {
            if let Err(e) = world.parley().await {
                error!(
                    session_id = %world.session_id(),
                    turn = world.turns(),
                    error = %e,
                    "Conversation aborted"
                );
                world.shutdown().await;
                return Err(e);
            }
        }

        let saved = world.save_data(self.store.as_ref()).await;
        world.shutdown().await;
        let (outcome, path) = saved?;

        info!(
            session_id = %world.session_id(),
            turns = world.turns(),
            completed = outcome.completed,
            "Conversation finished"
        );
        Ok(SessionSummary {
            outcome,
            path,
            turns: world.turns(),
        })
    }

    /// Onboard both workers concurrently, then pair them.
    ///
    /// If either onboarding fails both workers are shut down and the error is
    /// returned.
    pub async fn run(
        &self,
        participants: [Arc<dyn Participant>; 2],
    ) -> ColloquyResult<SessionSummary> {
        let onboarded = tokio::try_join!(
            self.run_onboard(participants[0].clone()),
            self.run_onboard(participants[1].clone())
        );
        if let Err(e) = onboarded {
            error!(error = %e, "Onboarding failed, releasing both workers");
            shutdown_all(&participants, self.config.shutdown_timeout()).await;
            return Err(e);
        }
        self.run_conversation(participants.into()).await
    }
}
