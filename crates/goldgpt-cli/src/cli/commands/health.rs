//! Backend health check.

use anyhow::{Context, Result};
use goldgpt_core::api::ApiClient;
use goldgpt_core::config::Config;

pub async fn run(config: &Config, base_url: &str) -> Result<()> {
    let api = ApiClient::new(base_url, config.request_timeout())?;
    let health = api
        .health()
        .await
        .with_context(|| format!("GoldGPT backend at {base_url} is not healthy"))?;

    println!("Status: {}", health.status);
    if let Some(timestamp) = health.timestamp {
        println!("Timestamp: {timestamp}");
    }
    Ok(())
}
