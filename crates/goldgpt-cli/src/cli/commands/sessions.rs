//! Session command handlers.

use anyhow::{Context, Result};
use chrono::Utc;
use goldgpt_core::api::ApiClient;
use goldgpt_core::config::Config;
use goldgpt_core::session::{SessionEvent, SessionRuntime, relative_label};

use super::format_message;

pub async fn list(config: &Config, base_url: &str) -> Result<()> {
    let api = ApiClient::new(base_url, config.request_timeout())?;
    let mut runtime = SessionRuntime::new(api);
    runtime.dispatch(SessionEvent::RefreshHistory);
    runtime.settle().await;

    let history = &runtime.state.history;
    if history.is_placeholder() {
        eprintln!("Warning: could not reach {base_url}; showing placeholder history.");
    }
    if history.is_empty() {
        println!("No sessions found.");
        return Ok(());
    }

    let now = Utc::now();
    for entry in history.entries() {
        let label = relative_label(entry.timestamp, now);
        let label = if label.is_empty() { "unknown" } else { &label };
        println!("{}  {}  {}", entry.title, entry.id, label);
    }
    Ok(())
}

pub async fn show(config: &Config, base_url: &str, id: &str) -> Result<()> {
    let api = ApiClient::new(base_url, config.request_timeout())?;
    let session = api
        .load_session(id)
        .await
        .with_context(|| format!("load session '{id}'"))?;

    if session.messages.is_empty() {
        println!("Session '{id}' is empty.");
        return Ok(());
    }

    let transcript: Vec<String> = session
        .messages
        .iter()
        .map(|message| {
            let speaker = if message.is_user() { "You" } else { "GoldGPT" };
            format!("{speaker}: {}", format_message(message))
        })
        .collect();
    println!("{}", transcript.join("\n\n"));
    Ok(())
}

pub async fn delete(config: &Config, base_url: &str, id: &str) -> Result<()> {
    let api = ApiClient::new(base_url, config.request_timeout())?;
    api.delete_session(id)
        .await
        .with_context(|| format!("delete session '{id}'"))?;
    println!("Deleted session {id}");
    Ok(())
}
