//! Session effect types.
//!
//! Effects are requests returned by the reducer that the runtime executes.
//! They represent I/O only; the reducer never performs I/O itself.

use crate::api::{ChatRequest, SaveSessionRequest};
use crate::session::task::TaskId;

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEffect {
    /// `POST /api/chat`.
    SendChat { task: TaskId, request: ChatRequest },

    /// `POST /api/chat/session/{id}`. Fire-and-forget: the runtime detaches it.
    SaveSession {
        session_id: String,
        body: SaveSessionRequest,
    },

    /// `GET /api/chat/session/{id}`.
    LoadSession { task: TaskId, session_id: String },

    /// `GET /api/chat/history`.
    RefreshHistory { task: TaskId },

    /// `DELETE /api/chat/session/{id}`.
    DeleteSession { session_id: String },
}
