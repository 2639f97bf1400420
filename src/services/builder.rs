//! Request builder
//!
//! Turns one (endpoint, message batch, temperature, credential) tuple into a
//! serialized request ready for the transport

use crate::config::EndpointSpec;
use crate::models::openai::{ChatCompletionRequest, ChatMessage};
use crate::utils::error::DispatchResult;

/// A fully built request: target URL, headers and encoded JSON body
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub body: Vec<u8>,
}

impl PreparedRequest {
    /// Value of a header by (case-insensitive) name
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Build the payload for one unit
pub fn build_payload(
    endpoint: &EndpointSpec,
    messages: &[ChatMessage],
    temperature: f64,
) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: endpoint.model_name.clone(),
        messages: messages.to_vec(),
        temperature,
    }
}

/// Build the request for one unit
pub fn build_request(
    endpoint: &EndpointSpec,
    messages: &[ChatMessage],
    temperature: f64,
    credential: &str,
) -> DispatchResult<PreparedRequest> {
    let payload = build_payload(endpoint, messages, temperature);
    let body = serde_json::to_vec(&payload)?;

    Ok(PreparedRequest {
        url: endpoint.url.clone(),
        headers: vec![
            ("Authorization", format!("Bearer {}", credential)),
            ("Content-Type", "application/json".to_string()),
        ],
        body,
    })
}
