//! File-based configuration loading
//!
//! Loads the batch description (endpoints, message batches, temperatures) from a JSON file

use crate::models::openai::ChatMessage;
use crate::utils::de::null_as_default;
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default config file name, searched in the working directory first
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// One chat completion endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EndpointSpec {
    /// Full URL the request is POSTed to
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,

    /// Model name sent in the payload; also selects the `API_KEY_<model>` credential
    #[serde(rename = "model", default, deserialize_with = "null_as_default")]
    pub model_name: String,
}

impl EndpointSpec {
    pub fn new(url: impl Into<String>, model_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            model_name: model_name.into(),
        }
    }
}

/// One ordered conversation sent as the `messages` field
pub type MessageBatch = Vec<ChatMessage>;

/// Batch configuration loaded from JSON file
///
/// `temperatures[i]` applies to `messages_list[i]` for every endpoint, so
/// `temperatures` must be at least as long as `messages_list`. [`BatchConfig::load`]
/// enforces this; extra temperatures are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    /// Endpoints, in dispatch order
    #[serde(rename = "api_configs", default, deserialize_with = "null_as_default")]
    pub endpoints: Vec<EndpointSpec>,

    /// Message batches, in dispatch order
    #[serde(default, deserialize_with = "null_as_default")]
    pub messages_list: Vec<MessageBatch>,

    /// Per-batch temperatures, indexed like `messages_list`
    #[serde(default, deserialize_with = "null_as_default")]
    pub temperatures: Vec<f64>,
}

/// One (endpoint, message batch, temperature) request/response cycle
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchUnit {
    /// Position in the cross-product, endpoint-major
    pub index: usize,
    pub endpoint: EndpointSpec,
    /// Index into `messages_list`; also selects the temperature
    pub batch_index: usize,
    pub messages: MessageBatch,
    pub temperature: f64,
}

impl BatchConfig {
    /// Load configuration from JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        info!("Loading configuration from: {:?}", path);

        let content = std::fs::read(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_slice(&content)?;

        debug!(
            "Loaded {} endpoints, {} message batches, {} temperatures",
            config.endpoints.len(),
            config.messages_list.len(),
            config.temperatures.len()
        );
        Ok(config)
    }

    /// Parse and validate configuration from raw bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        let config: BatchConfig = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from default locations
    /// Searches in order:
    /// 1. ./config.json
    /// 2. ~/.config/chatbatch/config.json
    pub fn load_default() -> Result<Self, ConfigError> {
        let searched = Self::default_locations();
        for path in &searched {
            if path.exists() {
                return Self::load(path);
            }
        }

        Err(ConfigError::NotFound { searched })
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_FILE)];
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("chatbatch").join(DEFAULT_CONFIG_FILE));
        }
        paths
    }

    /// Validate configuration
    ///
    /// Only the positional temperature coupling is checked; endpoint URLs and
    /// model names are passed through untouched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.temperatures.len() < self.messages_list.len() {
            return Err(ConfigError::Parse(format!(
                "temperatures has {} entries but messages_list has {}; every message batch needs a temperature",
                self.temperatures.len(),
                self.messages_list.len()
            )));
        }
        Ok(())
    }

    /// Number of units a dispatch of this config launches
    pub fn unit_count(&self) -> usize {
        self.endpoints.len() * self.messages_list.len()
    }

    /// Expand the endpoint × message batch cross-product into dispatch units
    ///
    /// Units are ordered endpoint-major. The temperature is picked by the
    /// batch's position, so every endpoint sees the same temperature for the
    /// same batch.
    pub fn plan_units(&self) -> Result<Vec<DispatchUnit>, ConfigError> {
        self.validate()?;

        let mut units = Vec::with_capacity(self.unit_count());
        for endpoint in &self.endpoints {
            for (batch_index, messages) in self.messages_list.iter().enumerate() {
                units.push(DispatchUnit {
                    index: units.len(),
                    endpoint: endpoint.clone(),
                    batch_index,
                    messages: messages.clone(),
                    temperature: self.temperatures[batch_index],
                });
            }
        }
        Ok(units)
    }
}
