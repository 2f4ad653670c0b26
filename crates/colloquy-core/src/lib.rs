//! Core types and error definitions for Colloquy.
//!
//! This crate provides the foundational types shared across all Colloquy
//! crates: the unified error enum, the [`Action`] record exchanged between
//! participants, and the [`Participant`] trait every worker handle implements.
//!
//! # Main types
//!
//! - [`ColloquyError`]: Unified error enum for all Colloquy subsystems.
//! - [`ColloquyResult`]: Convenience alias for `Result<T, ColloquyError>`.
//! - [`Action`]: A single message produced or observed by a participant.
//! - [`Participant`]: Capability set of a remote worker handle.
//! - [`ParticipantStatus`]: Disconnect-type flags read at save time.

/// Action records exchanged between participants.
pub mod action;
/// Error types.
pub mod error;
/// Participant trait and status flags.
pub mod participant;

pub use action::{Action, DONE_MARKER, SYSTEM_ID};
pub use error::{ColloquyError, ColloquyResult};
pub use participant::{Participant, ParticipantStatus};
