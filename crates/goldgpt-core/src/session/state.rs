//! Session state container.
//!
//! ```text
//! SessionState
//! ├── messages: Vec<Message>        (active conversation, display order)
//! ├── session_id: Option<String>    (bound after first successful exchange)
//! ├── error: Option<String>         (banner text)
//! ├── history: HistoryIndex         (sidebar cache)
//! ├── pending_send: Option<PendingSend>
//! ├── epoch: u64                    (bumped whenever the active session changes)
//! ├── task_seq / tasks              (load + history refresh bookkeeping)
//! └── base_url                      (quoted in connectivity messages)
//! ```

use crate::api::Message;
use crate::session::history::HistoryIndex;
use crate::session::task::{TaskId, TaskSeq, Tasks};

/// Title used when a session has no user message to derive one from.
pub const FALLBACK_TITLE: &str = "New Chat";

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 50;

/// A send that has not settled yet.
#[derive(Debug, Clone)]
pub struct PendingSend {
    pub task: TaskId,
    /// Epoch the send was issued in.
    pub epoch: u64,
    /// Conversation as it stood after the optimistic user message.
    pub transcript: Vec<Message>,
}

#[derive(Debug)]
pub struct SessionState {
    pub messages: Vec<Message>,
    pub session_id: Option<String>,
    pub error: Option<String>,
    pub history: HistoryIndex,
    pub pending_send: Option<PendingSend>,
    pub epoch: u64,
    pub task_seq: TaskSeq,
    pub tasks: Tasks,
    pub base_url: String,
}

impl SessionState {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            session_id: None,
            error: None,
            history: HistoryIndex::default(),
            pending_send: None,
            epoch: 0,
            task_seq: TaskSeq::default(),
            tasks: Tasks::default(),
            base_url: base_url.into(),
        }
    }

    /// True while a send round-trip is in flight.
    pub fn is_loading(&self) -> bool {
        self.pending_send.is_some()
    }

    /// Clears the conversation and unbinds the session.
    ///
    /// Any load still in flight is abandoned so it cannot overwrite the reset.
    pub(crate) fn reset_active(&mut self) {
        self.messages.clear();
        self.session_id = None;
        self.error = None;
        self.tasks.session_load.clear();
        self.epoch = self.epoch.wrapping_add(1);
    }

    pub(crate) fn connectivity_banner(&self) -> String {
        format!(
            "Failed to send message. Please check that the GoldGPT server is running at {}.",
            self.base_url
        )
    }

    pub(crate) fn connectivity_reply(&self, error: &str) -> String {
        format!(
            "I'm sorry, I'm having trouble connecting to the server. \
             Please make sure the GoldGPT API is running on {}. Error: {error}",
            self.base_url
        )
    }
}

/// Derives the saved title: the first user message, cut to 50 characters.
pub fn session_title(messages: &[Message]) -> String {
    messages
        .iter()
        .find(|m| m.is_user())
        .map(|m| m.content.chars().take(TITLE_MAX_CHARS).collect::<String>())
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_uses_first_user_message() {
        let messages = vec![
            Message::assistant("Welcome"),
            Message::user("Gold outlook"),
            Message::user("Second"),
        ];
        assert_eq!(session_title(&messages), "Gold outlook");
    }

    #[test]
    fn title_truncates_to_fifty_characters() {
        let long = "ذهب".repeat(30);
        let title = session_title(&[Message::user(long)]);
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS);
    }

    #[test]
    fn title_falls_back_without_user_message() {
        assert_eq!(session_title(&[]), FALLBACK_TITLE);
        assert_eq!(session_title(&[Message::assistant("Hi")]), FALLBACK_TITLE);
        assert_eq!(session_title(&[Message::user("")]), FALLBACK_TITLE);
    }
}
