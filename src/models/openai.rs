//! OpenAI chat completion data models
//!
//! Request and response shapes exchanged with every endpoint

use crate::utils::de::null_as_default;
use serde::{Deserialize, Serialize};

/// One role/content pair of a conversation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Message role ("system", "user", "assistant")
    #[serde(default, deserialize_with = "null_as_default")]
    pub role: String,
    /// Message text
    #[serde(default, deserialize_with = "null_as_default")]
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatCompletionRequest {
    /// Model name
    pub model: String,
    /// Conversation to complete
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature
    pub temperature: f64,
}

/// Chat completion response body
///
/// Only `choices[0].message.content` is consumed; everything else is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ReplyMessage>,
}

/// Assistant message inside a choice
///
/// Unlike [`ChatMessage`], absent or null fields stay `None` so the decoder
/// can tell a missing reply from an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReplyMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// `choices[0].message.content`, if every element of the path is present
    pub fn first_content(&self) -> Option<&str> {
        self.choices.first()?.message.as_ref()?.content.as_deref()
    }
}
