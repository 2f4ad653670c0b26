#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]

use async_trait::async_trait;
use colloquy_channels::{ChannelParticipant, ChannelRemote};
use colloquy_core::{Action, ColloquyError, ColloquyResult, Participant, ParticipantStatus};
use colloquy_session::{FileOutcomeStore, OutcomeStore};
use colloquy_world::{DialogTask, OnboardingConfig, TaskConfig};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Helper: a task writing into a temp directory.
fn temp_task(config: TaskConfig) -> (DialogTask, Arc<FileOutcomeStore>, tempfile::TempDir) {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(FileOutcomeStore::new(tmp.path().join("data")));
    let task = DialogTask::new(config, OnboardingConfig::default(), store.clone());
    (task, store, tmp)
}

/// Helper: two channel participants whose remotes have `lines` messages queued.
async fn scripted_pair(
    lines: usize,
) -> ([Arc<ChannelParticipant>; 2], [ChannelRemote; 2]) {
    let (p1, r1) = ChannelParticipant::new("W1", 128);
    let (p2, r2) = ChannelParticipant::new("W2", 128);
    for i in 0..lines {
        r1.say(format!("W1 line {i}")).await.unwrap();
        r2.say(format!("W2 line {i}")).await.unwrap();
    }
    ([Arc::new(p1), Arc::new(p2)], [r1, r2])
}

fn as_dyn(pair: &[Arc<ChannelParticipant>; 2]) -> Vec<Arc<dyn Participant>> {
    pair.iter()
        .map(|p| p.clone() as Arc<dyn Participant>)
        .collect()
}

#[tokio::test]
async fn test_turn_budget_caps_conversation() {
    let (task, _store, _tmp) = temp_task(TaskConfig::default());
    let (pair, _remotes) = scripted_pair(15).await;

    let summary = task.run_conversation(as_dyn(&pair)).await.unwrap();
    assert_eq!(summary.turns, 20);
    assert_eq!(summary.outcome.dialog.len(), 20);
    for (i, entry) in summary.outcome.dialog.entries().iter().enumerate() {
        assert_eq!(entry.speaker(), i % 2);
    }
    assert!(summary.outcome.completed);
    assert!(pair.iter().all(|p| p.is_shut_down()));
    assert!(pair.iter().all(|p| !p.is_ineligible()));
}

#[tokio::test]
async fn test_custom_turn_budget() {
    let config = TaskConfig {
        max_turns: 5,
        ..TaskConfig::default()
    };
    let (task, _store, _tmp) = temp_task(config);
    let (pair, _remotes) = scripted_pair(10).await;

    let summary = task.run_conversation(as_dyn(&pair)).await.unwrap();
    assert_eq!(summary.outcome.dialog.len(), 5);
    assert_eq!(summary.outcome.dialog.entries()[4].text(), "W1 line 2");
}

#[tokio::test]
async fn test_done_signal_stops_early() {
    let (task, _store, _tmp) = temp_task(TaskConfig::default());
    let (p1, r1) = ChannelParticipant::new("W1", 16);
    let (p2, r2) = ChannelParticipant::new("W2", 16);
    r1.say("hello").await.unwrap();
    r2.say("hi, how are you?").await.unwrap();
    r1.say("great, bye [DONE]").await.unwrap();
    r2.say("never read").await.unwrap();

    let pair = [Arc::new(p1), Arc::new(p2)];
    let summary = task.run_conversation(as_dyn(&pair)).await.unwrap();
    assert_eq!(summary.turns, 3);
    assert_eq!(summary.outcome.dialog.len(), 2);
    assert!(summary.outcome.completed);
}

#[tokio::test]
async fn test_dropout_saves_incomplete() {
    let (task, store, _tmp) = temp_task(TaskConfig {
        max_turns: 4,
        ..TaskConfig::default()
    });
    let (pair, remotes) = scripted_pair(2).await;
    remotes[1].return_hit();

    let summary = task.run_conversation(as_dyn(&pair)).await.unwrap();
    assert!(!summary.outcome.completed);
    assert_eq!(summary.outcome.bad_workers, vec!["W2"]);
    assert!(pair.iter().all(|p| p.is_ineligible()));

    let name = summary.path.file_name().unwrap().to_str().unwrap();
    assert!(name.ends_with("_sandbox_incomplete.json"));
    assert_eq!(store.list().await.unwrap(), vec![summary.path.clone()]);
}

#[tokio::test]
async fn test_immediate_done_is_incomplete() {
    let (task, _store, _tmp) = temp_task(TaskConfig {
        sandbox: false,
        ..TaskConfig::default()
    });
    let (p1, r1) = ChannelParticipant::new("W1", 4);
    let (p2, _r2) = ChannelParticipant::new("W2", 4);
    r1.say("[DONE]").await.unwrap();

    let pair = [Arc::new(p1), Arc::new(p2)];
    let summary = task.run_conversation(as_dyn(&pair)).await.unwrap();
    assert!(summary.outcome.dialog.is_empty());
    assert!(summary.outcome.bad_workers.is_empty());
    assert!(!summary.outcome.completed);
    assert!(pair.iter().all(|p| p.is_ineligible()));
    let name = summary.path.file_name().unwrap().to_str().unwrap();
    assert!(name.ends_with("_live_incomplete.json"));
}

#[tokio::test]
async fn test_failure_shuts_down_and_saves_nothing() {
    let (task, store, _tmp) = temp_task(TaskConfig::default());
    let (p1, r1) = ChannelParticipant::new("W1", 4);
    let (p2, r2) = ChannelParticipant::new("W2", 4);
    r1.say("hello").await.unwrap();
    drop(r2);

    let pair = [Arc::new(p1), Arc::new(p2)];
    let err = task.run_conversation(as_dyn(&pair)).await.unwrap_err();
    assert!(matches!(err, ColloquyError::Disconnected(_)));
    assert!(pair.iter().all(|p| p.is_shut_down()));
    assert!(store.list().await.unwrap().is_empty());
    drop(r1);
}

#[tokio::test]
async fn test_act_timeout_is_fatal() {
    let (task, _store, _tmp) = temp_task(TaskConfig {
        act_timeout_secs: 1,
        ..TaskConfig::default()
    });
    let (pair, _remotes) = scripted_pair(0).await;

    let err = task.run_conversation(as_dyn(&pair)).await.unwrap_err();
    assert!(matches!(err, ColloquyError::Timeout(_)));
}

#[tokio::test]
async fn test_full_run_onboards_both() {
    let (task, _store, _tmp) = temp_task(TaskConfig {
        max_turns: 2,
        ..TaskConfig::default()
    });
    let (p1, mut r1) = ChannelParticipant::new("W1", 16);
    let (p2, mut r2) = ChannelParticipant::new("W2", 16);
    // Onboarding reply first, then the conversation line.
    for remote in [&r1, &r2] {
        remote.say("about me").await.unwrap();
        remote.say("let's talk").await.unwrap();
    }

    let summary = task
        .run([Arc::new(p1), Arc::new(p2)])
        .await
        .unwrap();
    assert_eq!(summary.outcome.dialog.len(), 2);
    assert_eq!(summary.outcome.dialog.entries()[0].text(), "let's talk");

    assert_eq!(r1.recv().await.unwrap().text, "Welcome onboard!");
    assert_eq!(r2.recv().await.unwrap().text, "Welcome onboard!");
}

#[tokio::test]
async fn test_failed_onboarding_shuts_both_down() {
    let (task, store, _tmp) = temp_task(TaskConfig::default());
    let (p1, r1) = ChannelParticipant::new("W1", 16);
    let (p2, r2) = ChannelParticipant::new("W2", 16);
    r1.say("about me").await.unwrap();
    drop(r2);

    let pair = [Arc::new(p1), Arc::new(p2)];
    let err = task
        .run([pair[0].clone() as Arc<dyn Participant>, pair[1].clone()])
        .await
        .unwrap_err();
    assert!(matches!(err, ColloquyError::Disconnected(_)));
    assert!(pair.iter().all(|p| p.is_shut_down()));
    assert!(store.list().await.unwrap().is_empty());
    drop(r1);
}

#[tokio::test]
async fn test_turn_budget_counts_turns_not_loop_passes() {
    let (task, _store, _tmp) = temp_task(TaskConfig {
        max_turns: 3,
        ..TaskConfig::default()
    });
    let (pair, _remotes) = scripted_pair(5).await;

    let summary = task.run_conversation(as_dyn(&pair)).await.unwrap();
    assert_eq!(summary.turns, 3);
    assert_eq!(summary.outcome.dialog.len(), 3);
    assert_eq!(summary.outcome.dialog.entries()[2].text(), "W1 line 1");
}

/// A participant that rejects timeouts and counts its calls.
struct LegacyParticipant {
    id: &'static str,
    acts: AtomicUsize,
    shutdowns: AtomicUsize,
}

impl LegacyParticipant {
    fn new(id: &'static str) -> Self {
        Self {
            id,
            acts: AtomicUsize::new(0),
            shutdowns: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl Participant for LegacyParticipant {
    fn worker_id(&self) -> &str {
        self.id
    }

    async fn act(&self, timeout: Option<Duration>) -> ColloquyResult<Action> {
        if timeout.is_some() {
            return Err(ColloquyError::Unsupported("legacy handle".into()));
        }
        let n = self.acts.fetch_add(1, Ordering::SeqCst);
        Ok(Action::from_text(self.id, format!("{} says {n}", self.id)))
    }

    async fn observe(&self, _action: Action) -> ColloquyResult<()> {
        Ok(())
    }

    async fn shutdown(&self, timeout: Option<Duration>) -> ColloquyResult<()> {
        if timeout.is_some() {
            return Err(ColloquyError::Unsupported("legacy handle".into()));
        }
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn status(&self) -> ParticipantStatus {
        ParticipantStatus::default()
    }

    fn mark_ineligible(&self) {}
}

#[tokio::test]
async fn test_legacy_participants_are_driven_without_timeouts() {
    let (task, _store, _tmp) = temp_task(TaskConfig {
        max_turns: 4,
        act_timeout_secs: 10,
        shutdown_timeout_secs: 10,
        ..TaskConfig::default()
    });
    let a = Arc::new(LegacyParticipant::new("A"));
    let b = Arc::new(LegacyParticipant::new("B"));

    let summary = task
        .run_conversation(vec![a.clone() as Arc<dyn Participant>, b.clone()])
        .await
        .unwrap();
    assert_eq!(summary.outcome.dialog.len(), 4);
    assert_eq!(a.acts.load(Ordering::SeqCst), 2);
    assert_eq!(b.acts.load(Ordering::SeqCst), 2);
    assert_eq!(a.shutdowns.load(Ordering::SeqCst), 1);
    assert_eq!(b.shutdowns.load(Ordering::SeqCst), 1);
}
