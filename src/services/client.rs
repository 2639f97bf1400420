//! HTTP client service
//!
//! One POST per unit over a single pooled client shared by every unit

use crate::config::ClientSettings;
use crate::services::builder::PreparedRequest;
use crate::utils::error::DispatchResult;
use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Raw HTTP answer, before any interpretation of the body
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub status_text: String,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx class
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Chat completion transport
///
/// Cloning is cheap and clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ChatClient {
    client: Client,
}

impl ChatClient {
    /// Create a new client instance
    ///
    /// No timeout is applied unless `settings.timeout` is set.
    pub fn new(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder().user_agent(settings.user_agent.as_str());
        if let Some(secs) = settings.timeout {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    /// Issue exactly one POST; no retry
    pub async fn send(&self, request: PreparedRequest) -> DispatchResult<RawResponse> {
        debug!("POST {} ({} bytes)", request.url, request.body.len());

        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.body(request.body).send().await?;

        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
