//! Participant implementations for running Colloquy tasks.
//!
//! The crowdsourcing platform's own worker handles live outside this
//! workspace; the participants here let the task run in-process or on a
//! terminal.
//!
//! # Main types
//!
//! - [`ChannelParticipant`]: Participant fed through tokio mpsc channels.
//! - [`ChannelRemote`]: The worker side of a [`ChannelParticipant`].
//! - [`TerminalParticipant`]: Participant typing on a line-oriented stream.

/// In-process participant backed by tokio channels.
pub mod channel;
/// Line-oriented terminal participant.
pub mod terminal;

pub use channel::{ChannelParticipant, ChannelRemote};
pub use terminal::{SharedReader, SharedWriter, TerminalParticipant};
