//! Full-screen terminal chat for GoldGPT.

pub mod effects;
pub mod events;
pub mod input;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod text;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use goldgpt_core::api::ApiClient;
use goldgpt_core::config::Config;
pub use runtime::TuiRuntime;

/// Runs the interactive chat against `base_url`.
///
/// # Errors
/// Returns an error when not attached to a terminal, or if the terminal
/// cannot be set up or drawn to.
pub async fn run_interactive_chat(config: &Config, base_url: &str) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "Chat mode requires a terminal.\n\
             Use `goldgpt send '...'` for non-interactive use."
        );
    }

    let api = ApiClient::new(base_url, config.request_timeout())?;
    tracing::info!(%base_url, "starting interactive chat");

    let mut runtime = TuiRuntime::new(api, config.sidebar_open)?;
    let result = runtime.run();
    // Restore before printing anything.
    drop(runtime);
    result?;

    writeln!(stderr(), "Goodbye!")?;
    Ok(())
}
