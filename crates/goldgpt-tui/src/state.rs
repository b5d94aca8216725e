//! Application state composition.
//!
//! ```text
//! AppState
//! ├── session: SessionState   (messages, bound id, history, error banner)
//! ├── input: InputState       (composer buffer)
//! ├── sidebar: SidebarState   (open flag, selection)
//! ├── focus: Focus
//! ├── scroll: u16             (lines scrolled up from the bottom)
//! ├── spinner_frame / now     (advanced on Tick)
//! └── should_quit
//! ```

use chrono::{DateTime, Utc};
use goldgpt_core::session::{HistoryEntry, SessionState};

use crate::input::InputState;

/// Suggestions shown on the welcome screen, selectable with 1–4.
pub const WELCOME_SUGGESTIONS: [&str; 4] = [
    "What's the current gold price?",
    "How should I invest in gold?",
    "Generate a gold image",
    "Show me available gold products",
];

/// Which pane receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Sidebar,
}

#[derive(Debug, Clone, Default)]
pub struct SidebarState {
    pub open: bool,
    /// Index into the history entries.
    pub selected: usize,
}

impl SidebarState {
    /// Keeps the selection inside `len` entries.
    pub fn clamp(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

#[derive(Debug)]
pub struct AppState {
    pub session: SessionState,
    pub input: InputState,
    pub sidebar: SidebarState,
    pub focus: Focus,
    /// Transcript lines scrolled up from the newest line; 0 follows the tail.
    pub scroll: u16,
    pub spinner_frame: usize,
    pub now: DateTime<Utc>,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(base_url: impl Into<String>, sidebar_open: bool) -> Self {
        Self {
            session: SessionState::new(base_url),
            input: InputState::default(),
            sidebar: SidebarState {
                open: sidebar_open,
                selected: 0,
            },
            focus: Focus::Input,
            scroll: 0,
            spinner_frame: 0,
            now: Utc::now(),
            should_quit: false,
        }
    }

    pub fn selected_entry(&self) -> Option<&HistoryEntry> {
        self.session.history.entries().get(self.sidebar.selected)
    }

    pub fn shows_welcome(&self) -> bool {
        self.session.messages.is_empty()
    }
}
