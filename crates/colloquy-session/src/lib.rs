//! Transcript bookkeeping and outcome persistence for dialogue sessions.

/// Outcome records and session kinds.
pub mod outcome;
/// Outcome stores.
pub mod store;
/// Append-only dialogue transcript.
pub mod transcript;

pub use outcome::{OutcomeRecord, SessionKind};
pub use store::{outcome_filename, FileOutcomeStore, OutcomeStore};
pub use transcript::{Transcript, TranscriptEntry};
