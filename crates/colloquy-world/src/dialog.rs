use crate::config::TaskConfig;
use crate::teardown::{act_with_fallback, shutdown_all};
use colloquy_core::{ColloquyError, ColloquyResult, Participant};
use colloquy_session::{OutcomeRecord, OutcomeStore, SessionKind, Transcript};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Round-robin conversation between exactly two participants.
///
/// Each [`parley`](Self::parley) is one turn: the current speaker acts, the
/// other participant observes the action, and the text is appended to the
/// transcript. An action with `episode_done` set ends the episode instead.
pub struct DialogWorld {
    session_id: Uuid,
    kind: SessionKind,
    participants: Vec<Arc<dyn Participant>>,
    transcript: Transcript,
    next_speaker: usize,
    turns: u32,
    episode_done: bool,
    act_timeout: Option<Duration>,
    shutdown_timeout: Option<Duration>,
}

impl DialogWorld {
    /// Pair two participants. Any other count is a config error.
    pub fn new(
        participants: Vec<Arc<dyn Participant>>,
        config: &TaskConfig,
    ) -> ColloquyResult<Self> {
        if participants.len() != 2 {
            return Err(ColloquyError::Config(format!(
                "a dialogue needs exactly 2 participants, got {}",
                participants.len()
            )));
        }
        Ok(Self {
            session_id: Uuid::new_v4(),
            kind: config.session_kind(),
            participants,
            transcript: Transcript::new(),
            next_speaker: 0,
            turns: 0,
            episode_done: false,
            act_timeout: config.act_timeout(),
            shutdown_timeout: config.shutdown_timeout(),
        })
    }

    /// Identifier used in logs and the saved file name.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Sandbox or live.
    pub fn session_kind(&self) -> SessionKind {
        self.kind
    }

    /// What has been said so far.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Turns taken so far, including the one that ended the episode.
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Whether a participant signalled the end of the conversation.
    pub fn episode_done(&self) -> bool {
        self.episode_done
    }

    /// The paired participants, in speaking order.
    pub fn participants(&self) -> &[Arc<dyn Participant>] {
        &self.participants
    }

    /// Take one turn. Failures from the participants are returned as-is.
    pub async fn parley(&mut self) -> ColloquyResult<()> {
        if self.episode_done {
            return Ok(());
        }
        let speaker = self.next_speaker;
        let listener = 1 - speaker;

        let action =
            act_with_fallback(self.participants[speaker].as_ref(), self.act_timeout).await?;
        self.turns += 1;
        self.next_speaker = listener;

        if action.episode_done {
            self.episode_done = true;
            info!(
                session_id = %self.session_id,
                worker_id = %self.participants[speaker].worker_id(),
                turn = self.turns,
                "Episode ended by participant"
            );
            return Ok(());
        }

        self.participants[listener].observe(action.clone()).await?;
        self.transcript.push(speaker, action.text);
        debug!(session_id = %self.session_id, speaker, turn = self.turns, "Turn recorded");
        Ok(())
    }

    /// Classify the session and build the record to persist.
    ///
    /// Any participant flagged as disconnected, abandoned, returned or expired
    /// lands in `bad_workers`. Such a session, or one where nothing was said,
    /// is incomplete.
    pub fn outcome(&self) -> OutcomeRecord {
        let bad_workers: Vec<String> = self
            .participants
            .iter()
            .filter(|p| p.status().failed_to_complete())
            .map(|p| p.worker_id().to_string())
            .collect();
        let completed = bad_workers.is_empty() && !self.transcript.is_empty();

        OutcomeRecord {
            session_id: self.session_id,
            session_kind: self.kind,
            completed,
            dialog: self.transcript.clone(),
            workers: self
                .participants
                .iter()
                .map(|p| p.worker_id().to_string())
                .collect(),
            bad_workers,
        }
    }

    /// Persist the outcome. Incomplete sessions mark every participant
    /// ineligible for reward first.
    pub async fn save_data(
        &self,
        store: &dyn OutcomeStore,
    ) -> ColloquyResult<(OutcomeRecord, PathBuf)> {
        let record = self.outcome();
        if !record.completed {
            warn!(
                session_id = %self.session_id,
                bad_workers = ?record.bad_workers,
                turns = self.turns,
                "Session incomplete, participants will not be approved"
            );
            for participant in &self.participants {
                participant.mark_ineligible();
            }
        }
        let path = store.save(&record).await?;
        Ok((record, path))
    }

    /// Shut both participants down in parallel.
    pub async fn shutdown(&self) {
        shutdown_all(&self.participants, self.shutdown_timeout).await;
    }
}
