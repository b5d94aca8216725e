//! Effect handlers.
//!
//! Handlers are pure async functions: they take an owned [`ApiClient`] clone
//! plus the effect's payload, perform one backend call, and return the
//! resulting [`SessionEvent`]. They never touch session state.
//!
//! ```ignore
//! // Runtime: spawns and sends the event to its inbox
//! let api = self.api.clone();
//! spawn(async move { tx.send(handlers::execute(api, effect).await) });
//! ```

use chrono::Utc;

use crate::api::{ApiClient, ChatRequest, SaveSessionRequest};
use crate::session::effects::SessionEffect;
use crate::session::events::SessionEvent;
use crate::session::task::TaskId;

/// Runs `effect` to completion and returns its result event.
pub async fn execute(api: ApiClient, effect: SessionEffect) -> SessionEvent {
    match effect {
        SessionEffect::SendChat { task, request } => send_chat(api, task, request).await,
        SessionEffect::SaveSession { session_id, body } => {
            save_session(api, session_id, body).await
        }
        SessionEffect::LoadSession { task, session_id } => {
            load_session(api, task, session_id).await
        }
        SessionEffect::RefreshHistory { task } => refresh_history(api, task).await,
        SessionEffect::DeleteSession { session_id } => delete_session(api, session_id).await,
    }
}

pub async fn send_chat(api: ApiClient, task: TaskId, request: ChatRequest) -> SessionEvent {
    let result = api.send_chat(&request).await;
    SessionEvent::SendFinished { task, result }
}

pub async fn save_session(
    api: ApiClient,
    session_id: String,
    body: SaveSessionRequest,
) -> SessionEvent {
    let result = api.save_session(&session_id, &body).await;
    SessionEvent::SaveFinished { session_id, result }
}

pub async fn load_session(api: ApiClient, task: TaskId, session_id: String) -> SessionEvent {
    let result = api.load_session(&session_id).await;
    SessionEvent::LoadFinished {
        task,
        session_id,
        result,
    }
}

/// Fetches the history index, stamping the event with the settle time.
pub async fn refresh_history(api: ApiClient, task: TaskId) -> SessionEvent {
    let result = api.chat_history().await;
    SessionEvent::HistoryLoaded {
        task,
        fetched_at: Utc::now(),
        result,
    }
}

pub async fn delete_session(api: ApiClient, session_id: String) -> SessionEvent {
    let result = api.delete_session(&session_id).await;
    SessionEvent::DeleteFinished { session_id, result }
}
