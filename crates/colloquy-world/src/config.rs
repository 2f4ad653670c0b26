use colloquy_session::SessionKind;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turn budget used when none is configured.
pub const DEFAULT_MAX_TURNS: u32 = 20;

/// Settings of one dialogue task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Run against the sandbox instead of live workers.
    #[serde(default = "default_sandbox")]
    pub sandbox: bool,
    /// Turns after which the conversation is cut off.
    #[serde(default = "default_max_turns")]
    pub max_turns: u32,
    /// Seconds a participant may take per action. `0` waits forever.
    #[serde(default)]
    pub act_timeout_secs: u64,
    /// Seconds a participant may take to shut down. `0` waits forever.
    #[serde(default)]
    pub shutdown_timeout_secs: u64,
}

fn default_sandbox() -> bool {
    true
}

fn default_max_turns() -> u32 {
    DEFAULT_MAX_TURNS
}

fn secs(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

impl TaskConfig {
    /// Sandbox or live, as recorded in saved outcomes.
    pub fn session_kind(&self) -> SessionKind {
        SessionKind::from_sandbox(self.sandbox)
    }

    /// Timeout passed to `Participant::act`.
    pub fn act_timeout(&self) -> Option<Duration> {
        secs(self.act_timeout_secs)
    }

    /// Timeout passed to `Participant::shutdown`.
    pub fn shutdown_timeout(&self) -> Option<Duration> {
        secs(self.shutdown_timeout_secs)
    }
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            sandbox: default_sandbox(),
            max_turns: default_max_turns(),
            act_timeout_secs: 0,
            shutdown_timeout_secs: 0,
        }
    }
}

/// Messages shown during onboarding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingConfig {
    /// Sent before the worker's first input.
    #[serde(default = "default_greeting")]
    pub greeting: String,
    /// Sent once the worker answered.
    #[serde(default = "default_closing")]
    pub closing: String,
}

fn default_greeting() -> String {
    "Welcome onboard!".to_string()
}

fn default_closing() -> String {
    "Thank you for your input! Please wait while we match you with another worker...".to_string()
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            closing: default_closing(),
        }
    }
}
