use crate::transcript::Transcript;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Distinguishes test runs from production runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    /// Run against the platform's sandbox.
    Sandbox,
    /// Run with real, paid workers.
    Live,
}

impl SessionKind {
    /// `Sandbox` when `is_sandbox`, `Live` otherwise.
    pub fn from_sandbox(is_sandbox: bool) -> Self {
        if is_sandbox {
            Self::Sandbox
        } else {
            Self::Live
        }
    }

    /// Tag used in file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sandbox => "sandbox",
            Self::Live => "live",
        }
    }
}

impl fmt::Display for SessionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What gets written to disk once a dialogue ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    /// Session the record belongs to.
    pub session_id: Uuid,
    /// Sandbox or live.
    pub session_kind: SessionKind,
    /// False when a worker dropped out or nothing was said.
    pub completed: bool,
    /// The dialogue, in turn order.
    pub dialog: Transcript,
    /// Worker ids, in participant-index order.
    pub workers: Vec<String>,
    /// Workers that failed to complete (disconnected, abandoned, returned, expired).
    pub bad_workers: Vec<String>,
}
