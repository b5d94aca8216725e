//! Interactive chat command.

use anyhow::{Context, Result};
use goldgpt_core::config::Config;

pub async fn run(config: &Config, base_url: &str) -> Result<()> {
    goldgpt_tui::run_interactive_chat(config, base_url)
        .await
        .context("interactive chat failed")
}
