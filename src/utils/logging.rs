//! Logging utilities
//!
//! Subscriber setup and helpers that keep log lines short

use crate::config::settings::LoggingConfig;
use crate::models::openai::{ChatCompletionRequest, ChatMessage};
use tracing_subscriber::EnvFilter;

/// Maximum number of characters of a response body kept in logs and errors
pub const MAX_LOGGED_BODY: usize = 200;

/// Initialize the global tracing subscriber
///
/// Logs always go to stderr; stdout is reserved for replies and the timing report.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow::anyhow!("Invalid log filter '{}': {}", config.level, e))?;

    let subscriber: Box<dyn tracing::Subscriber + Send + Sync> = if config.format == "json" {
        // JSON format logs (for log shippers)
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .with_current_span(true)
            .with_span_list(false)
            .finish())
    } else {
        Box::new(tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .finish())
    };

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow::anyhow!("Failed to set tracing subscriber: {}", e))?;

    Ok(())
}

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len).collect();
        format!("{}... ({} chars truncated)", kept, s.chars().count() - max_len)
    } else {
        s.to_string()
    }
}

fn filter_message(msg: &ChatMessage) -> serde_json::Value {
    // System prompts are usually long and uninteresting
    let max_len = if msg.role == "system" { 100 } else { 200 };
    serde_json::json!({
        "role": msg.role,
        "content": truncate_content(&msg.content, max_len),
    })
}

/// Create a filtered summary of a chat request for logging
pub fn create_request_log_summary(request: &ChatCompletionRequest) -> serde_json::Value {
    let messages: Vec<serde_json::Value> = request.messages.iter()
        .map(filter_message)
        .collect();

    serde_json::json!({
        "model": request.model,
        "temperature": request.temperature,
        "messages": messages,
    })
}
