//! Session reducer.
//!
//! All session state mutations happen here. The runtime calls
//! `update(state, event)` and executes the returned effects.

use crate::api::{ChatRequest, ChatResponse, Message, SaveSessionRequest};
use crate::session::effects::SessionEffect;
use crate::session::events::SessionEvent;
use crate::session::state::{PendingSend, SessionState, session_title};
use crate::session::task::TaskKind;

pub fn update(state: &mut SessionState, event: SessionEvent) -> Vec<SessionEffect> {
    match event {
        SessionEvent::Send { text } => start_send(state, &text),
        SessionEvent::Load { session_id } => {
            let task = state.task_seq.next_id();
            state.tasks.state_mut(TaskKind::SessionLoad).start(task);
            vec![SessionEffect::LoadSession { task, session_id }]
        }
        SessionEvent::New => {
            state.reset_active();
            vec![]
        }
        SessionEvent::Delete { session_id } => vec![SessionEffect::DeleteSession { session_id }],
        SessionEvent::RefreshHistory => vec![start_history_refresh(state)],

        SessionEvent::SendFinished { task, result } => {
            let Some(pending) = state.pending_send.take_if(|p| p.task == task) else {
                tracing::debug!(?task, "ignoring result for unknown send");
                return vec![];
            };
            match result {
                Ok(response) => finish_send(state, pending, response),
                Err(error) if pending.epoch == state.epoch => {
                    tracing::warn!(%error, kind = %error.kind, "send failed");
                    state.error = Some(state.connectivity_banner());
                    let reply = state.connectivity_reply(&error.to_string());
                    state.messages.push(Message::assistant(reply));
                    vec![]
                }
                Err(error) => {
                    tracing::warn!(%error, "send failed after the active session changed");
                    vec![]
                }
            }
        }
        SessionEvent::SaveFinished { session_id, result } => match result {
            Ok(()) => {
                tracing::debug!(%session_id, "session saved");
                vec![start_history_refresh(state)]
            }
            Err(error) => {
                tracing::warn!(%session_id, %error, "failed to save session");
                vec![]
            }
        },
        SessionEvent::LoadFinished {
            task,
            session_id,
            result,
        } => {
            if !state
                .tasks
                .state_mut(TaskKind::SessionLoad)
                .finish_if_active(task)
            {
                tracing::debug!(%session_id, "discarding superseded session load");
                return vec![];
            }
            match result {
                Ok(payload) => {
                    tracing::info!(%session_id, messages = payload.messages.len(), "session loaded");
                    state.messages = payload.messages;
                    state.session_id = Some(session_id);
                    state.epoch = state.epoch.wrapping_add(1);
                }
                Err(error) => {
                    tracing::warn!(%session_id, %error, "failed to load session");
                }
            }
            vec![]
        }
        SessionEvent::HistoryLoaded {
            task,
            fetched_at,
            result,
        } => {
            if !state
                .tasks
                .state_mut(TaskKind::HistoryRefresh)
                .finish_if_active(task)
            {
                return vec![];
            }
            match result {
                Ok(map) => state.history.replace(map),
                Err(error) => {
                    tracing::warn!(%error, "failed to load chat history, using placeholders");
                    state.history.use_placeholders(fetched_at);
                }
            }
            vec![]
        }
        SessionEvent::DeleteFinished { session_id, result } => match result {
            Ok(()) => {
                tracing::info!(%session_id, "session deleted");
                if state.session_id.as_deref() == Some(session_id.as_str()) {
                    state.reset_active();
                }
                vec![start_history_refresh(state)]
            }
            Err(error) => {
                tracing::warn!(%session_id, %error, "failed to delete session");
                state.error = Some(format!("Failed to delete chat: {error}"));
                vec![]
            }
        },
    }
}

/// Appends the user turn optimistically and issues the request.
///
/// No-op for blank input or while another send is in flight.
fn start_send(state: &mut SessionState, text: &str) -> Vec<SessionEffect> {
    let text = text.trim();
    if text.is_empty() || state.is_loading() {
        return vec![];
    }

    state.error = None;
    state.messages.push(Message::user(text));

    let task = state.task_seq.next_id();
    state.pending_send = Some(PendingSend {
        task,
        epoch: state.epoch,
        transcript: state.messages.clone(),
    });

    vec![SessionEffect::SendChat {
        task,
        request: ChatRequest {
            message: text.to_string(),
            session_id: state.session_id.clone(),
        },
    }]
}

fn finish_send(
    state: &mut SessionState,
    pending: PendingSend,
    response: ChatResponse,
) -> Vec<SessionEffect> {
    let (reply, response_session) = response.into_message();

    // The user moved to another session while this send was in flight: keep
    // the reply out of view but still persist the conversation it belongs to.
    if pending.epoch != state.epoch {
        tracing::info!("reply arrived for an inactive session");
        let Some(session_id) = response_session else {
            return vec![];
        };
        let mut transcript = pending.transcript;
        transcript.push(reply);
        return vec![save_effect(session_id, transcript)];
    }

    state.messages.push(reply);

    if state.session_id.is_none()
        && let Some(id) = &response_session
    {
        tracing::info!(session_id = %id, "bound session");
        state.session_id = Some(id.clone());
    }

    match response_session {
        Some(session_id) => vec![save_effect(session_id, state.messages.clone())],
        None => vec![],
    }
}

fn save_effect(session_id: String, messages: Vec<Message>) -> SessionEffect {
    let title = session_title(&messages);
    SessionEffect::SaveSession {
        session_id,
        body: SaveSessionRequest { messages, title },
    }
}

fn start_history_refresh(state: &mut SessionState) -> SessionEffect {
    let task = state.task_seq.next_id();
    state.tasks.state_mut(TaskKind::HistoryRefresh).start(task);
    SessionEffect::RefreshHistory { task }
}
