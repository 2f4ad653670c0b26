use serde::{Deserialize, Serialize};

/// Suffix a participant types to end the conversation.
pub const DONE_MARKER: &str = "[DONE]";

/// Sender id used for messages generated by the task itself.
pub const SYSTEM_ID: &str = "System";

/// A single message produced by a participant or sent to one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// Who produced the action (worker role or [`SYSTEM_ID`]).
    pub id: String,
    /// The message text.
    #[serde(default)]
    pub text: String,
    /// Set when the producer wants the episode to end.
    #[serde(default)]
    pub episode_done: bool,
}

impl Action {
    /// Creates an action with an explicit completion flag.
    pub fn new(id: impl Into<String>, text: impl Into<String>, episode_done: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            episode_done,
        }
    }

    /// Creates an action from typed text. The episode is marked done when the
    /// text ends with [`DONE_MARKER`]; the marker stays in `text`.
    pub fn from_text(id: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let episode_done = text.trim_end().ends_with(DONE_MARKER);
        Self::new(id, text, episode_done)
    }

    /// Creates a message sent by the task itself.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(SYSTEM_ID, text, false)
    }

    /// Creates an empty action that only signals the end of the episode.
    pub fn done(id: impl Into<String>) -> Self {
        Self::new(id, String::new(), true)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_done_marker_sets_episode_done() {
        let act = Action::from_text("worker_1", "bye now [DONE]  ");
        assert!(act.episode_done);
        assert_eq!(act.text, "bye now [DONE]  ");
    }

    #[test]
    fn test_plain_text_is_not_done() {
        let act = Action::from_text("worker_1", "[DONE] is only honoured at the end");
        assert!(!act.episode_done);
    }

    #[test]
    fn test_system_message() {
        let act = Action::system("Welcome onboard!");
        assert_eq!(act.id, SYSTEM_ID);
        assert!(!act.episode_done);
    }

    #[test]
    fn test_missing_fields_default() {
        let act: Action = serde_json::from_str(r#"{"id": "w"}"#).unwrap();
        assert_eq!(act.text, "");
        assert!(!act.episode_done);
    }
}
