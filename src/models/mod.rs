//! Data models module
//!
//! Wire types for OpenAI-compatible chat completion endpoints

pub mod openai;

pub use openai::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, Choice, ReplyMessage};
