//! One-shot send through the headless session runtime.

use anyhow::{Context, Result, bail};
use goldgpt_core::api::ApiClient;
use goldgpt_core::config::Config;
use goldgpt_core::session::{SessionEvent, SessionRuntime};

use super::format_message;

pub async fn run(
    config: &Config,
    base_url: &str,
    message: &str,
    session_id: Option<&str>,
) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Message must not be empty");
    }

    let api = ApiClient::new(base_url, config.request_timeout())?;
    let mut runtime = SessionRuntime::new(api);

    // Load first so the save after this exchange carries the whole transcript.
    if let Some(id) = session_id {
        runtime.dispatch(SessionEvent::Load {
            session_id: id.to_string(),
        });
        runtime.settle().await;
        if runtime.state.session_id.as_deref() != Some(id) {
            // The reducer only logs load failures; ask again for a readable error.
            let error = runtime.api().load_session(id).await.err();
            return match error {
                Some(e) => Err(e).with_context(|| format!("load session '{id}'")),
                None => bail!("load session '{id}'"),
            };
        }
    }

    runtime.dispatch(SessionEvent::Send {
        text: message.to_string(),
    });
    // Waits for the reply, the save and the history refresh it triggers.
    runtime.settle().await;

    let reply = runtime
        .state
        .messages
        .last()
        .filter(|m| !m.is_user())
        .context("no reply received")?;

    if let Some(error) = &runtime.state.error {
        eprintln!("{}", reply.content);
        bail!("{error}");
    }

    println!("{}", format_message(reply));
    if let Some(id) = &runtime.state.session_id {
        println!();
        println!("Session: {id}");
    }
    Ok(())
}
