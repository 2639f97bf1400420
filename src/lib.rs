//! Chat Batch Library
//!
//! Dispatches chat completion requests to many OpenAI-compatible endpoints concurrently

pub mod cli;
pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// Re-export common types
pub use config::{BatchConfig, DispatchUnit, EndpointSpec, Settings};
pub use models::openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
pub use services::{BatchDispatcher, BatchReport, ChatClient, CredentialSource, EnvCredentials, UnitOutcome};
pub use utils::error::{ConfigError, DispatchError, DispatchResult};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Library description
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Get version information
pub fn version_info() -> String {
    format!("{} v{} - {}", NAME, VERSION, DESCRIPTION)
}
