//! Conversation session manager.
//!
//! Elm-style: [`update`] is the only place session state changes. It returns
//! [`SessionEffect`]s, which [`handlers`] turn into backend calls whose results
//! come back as [`SessionEvent`]s.

mod effects;
mod events;
pub mod handlers;
pub mod history;
mod runtime;
mod state;
pub mod task;
mod update;

pub use effects::SessionEffect;
pub use events::SessionEvent;
pub use history::{HistoryEntry, HistoryIndex, HistorySource, relative_label};
pub use runtime::{SessionEventReceiver, SessionEventSender, SessionRuntime};
pub use state::{FALLBACK_TITLE, PendingSend, SessionState, TITLE_MAX_CHARS, session_title};
pub use task::{TaskId, TaskKind};
pub use update::update;
