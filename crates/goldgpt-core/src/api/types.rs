//! Wire types for the GoldGPT backend.
//!
//! Field names mirror the backend's JSON exactly. Payload structs keep any
//! fields they do not model in `extra` so a message loaded from the backend
//! and saved back is not silently stripped.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Author of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// Chart data attached to an assistant reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPayload {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub x: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub y: Vec<f64>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis_title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ChartPayload {
    /// Title shown in the transcript.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Chart")
    }

    /// Most recent data point, if any.
    pub fn latest(&self) -> Option<(&str, f64)> {
        let y = *self.y.last()?;
        let x = self.x.get(self.y.len() - 1).map_or("", String::as_str);
        Some((x, y))
    }
}

/// Generated image attached to an assistant reply.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base64: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_prompt: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImagePayload {
    /// Prompt shown to the user: the user's own wording when the backend kept it.
    pub fn display_prompt(&self) -> Option<&str> {
        self.original_prompt.as_deref().or(self.prompt.as_deref())
    }
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<ChartPayload>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePayload>,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            chart: None,
            image: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            chart: None,
            image: None,
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }
}

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatRequest {
    pub message: String,
    /// Serialized as `null` for a fresh session.
    pub session_id: Option<String>,
}

/// Response of `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub chart: Option<ChartPayload>,
    #[serde(default)]
    pub image: Option<ImagePayload>,
}

impl ChatResponse {
    /// Builds the assistant message shown for this reply.
    pub fn into_message(self) -> (Message, Option<String>) {
        let message = Message {
            role: Role::Assistant,
            content: self.response,
            chart: self.chart,
            image: self.image,
        };
        (message, self.session_id)
    }
}

/// Body of `POST /api/chat/session/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveSessionRequest {
    pub messages: Vec<Message>,
    pub title: String,
}

/// Response of `GET /api/chat/session/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionPayload {
    #[serde(default)]
    pub messages: Vec<Message>,
}

/// Per-session summary from `GET /api/chat/history`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HistorySummary {
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// Response of `GET /api/chat/history`: session id to summary.
pub type HistoryMap = HashMap<String, HistorySummary>;

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

/// Decodes a timestamp that may be epoch milliseconds or a date string.
///
/// Anything unrecognised becomes `None` rather than failing the whole payload.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_timestamp))
}

pub(crate) fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        Value::String(s) => parse_timestamp_str(s),
        _ => None,
    }
}

fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    // SQLite CURRENT_TIMESTAMP, always UTC
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|naive| naive.and_utc())
}
