//! CLI command handlers.

pub mod chat;
pub mod config;
pub mod health;
pub mod send;
pub mod sessions;

use goldgpt_core::api::Message;

/// Plain-text rendering of one message for stdout.
pub(crate) fn format_message(message: &Message) -> String {
    let mut out = message.content.clone();
    if let Some(chart) = &message.chart {
        out.push_str(&format!("\n📊 {}", chart.display_title()));
        if let Some((x, y)) = chart.latest() {
            out.push_str(&format!(" (latest {x}: {y:.2})"));
        }
    }
    if let Some(image) = &message.image {
        out.push_str(&format!(
            "\n🖼 {}",
            image.display_prompt().unwrap_or("Generated image")
        ));
        if let Some(location) = image.url.as_deref().or(image.filename.as_deref()) {
            out.push_str(&format!("\n   {location}"));
        }
    }
    out
}
