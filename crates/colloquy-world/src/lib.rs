//! Worlds that drive a paired dialogue-collection task.
//!
//! A task onboards each worker in an [`OnboardWorld`], pairs two of them in a
//! [`DialogWorld`] that alternates turns until someone signals the end or the
//! turn budget runs out, then persists the outcome and tears the pair down.
//!
//! # Main types
//!
//! - [`OnboardWorld`]: Single-participant welcome step.
//! - [`DialogWorld`]: Round-robin conversation between two participants.
//! - [`DialogTask`]: Runs onboarding, conversation, save and teardown.
//! - [`TaskConfig`]: Turn budget, timeouts and session kind.

/// Task configuration.
pub mod config;
/// Two-participant dialogue world.
pub mod dialog;
/// Single-participant onboarding world.
pub mod onboard;
/// End-to-end task driver.
pub mod task;
/// Participant call helpers and parallel teardown.
pub mod teardown;

pub use config::{OnboardingConfig, TaskConfig};
pub use dialog::DialogWorld;
pub use onboard::OnboardWorld;
pub use task::{DialogTask, SessionSummary};
pub use teardown::{act_with_fallback, shutdown_all};
