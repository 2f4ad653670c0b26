use serde::{Deserialize, Serialize};

/// One turn of the dialogue: who spoke and what they said.
///
/// Serialized as a two-element array `[index, "text"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry(pub usize, pub String);

impl TranscriptEntry {
    /// Index of the speaking participant.
    pub fn speaker(&self) -> usize {
        self.0
    }

    /// The message text.
    pub fn text(&self) -> &str {
        &self.1
    }
}

/// Chronological, append-only list of dialogue turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a turn.
    pub fn push(&mut self, speaker: usize, text: impl Into<String>) {
        self.entries.push(TranscriptEntry(speaker, text.into()));
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing was said.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All turns in order.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }
}
