//! Session events: user actions and async results.

use chrono::{DateTime, Utc};

use crate::api::{ApiError, ChatResponse, HistoryMap, SessionPayload};
use crate::session::task::TaskId;

#[derive(Debug)]
pub enum SessionEvent {
    // ========================================================================
    // Actions
    // ========================================================================
    /// Send a message in the active session.
    Send { text: String },
    /// Switch to a stored session.
    Load { session_id: String },
    /// Start an empty, unbound session.
    New,
    /// Delete a stored session.
    Delete { session_id: String },
    /// Re-fetch the history index.
    RefreshHistory,

    // ========================================================================
    // Results (sent by handlers through the runtime inbox)
    // ========================================================================
    SendFinished {
        task: TaskId,
        result: Result<ChatResponse, ApiError>,
    },
    SaveFinished {
        session_id: String,
        result: Result<(), ApiError>,
    },
    LoadFinished {
        task: TaskId,
        session_id: String,
        result: Result<SessionPayload, ApiError>,
    },
    HistoryLoaded {
        task: TaskId,
        /// When the fetch settled; dates placeholder entries on failure.
        fetched_at: DateTime<Utc>,
        result: Result<HistoryMap, ApiError>,
    },
    DeleteFinished {
        session_id: String,
        result: Result<(), ApiError>,
    },
}
