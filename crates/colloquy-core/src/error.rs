use thiserror::Error;

/// A convenience `Result` alias using [`ColloquyError`].
pub type ColloquyResult<T> = Result<T, ColloquyError>;

/// Top-level error type for Colloquy.
#[derive(Error, Debug)]
pub enum ColloquyError {
    /// A participant failed while acting, observing or shutting down.
    #[error("Participant error: {0}")]
    Participant(String),

    /// The participant is gone (closed connection, returned HIT, ...).
    #[error("Participant '{0}' disconnected")]
    Disconnected(String),

    /// The participant did not act within the requested timeout.
    #[error("Participant '{0}' timed out")]
    Timeout(String),

    /// The participant does not support the requested call shape,
    /// e.g. a timeout argument. Callers retry without it.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// An error related to session bookkeeping or persistence.
    #[error("Session error: {0}")]
    Session(String),

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ColloquyError {
    /// Whether the error asks the caller to retry without optional arguments.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}
