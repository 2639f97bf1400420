//! Error handling module
//!
//! Defines the fatal configuration errors and the per-unit dispatch errors

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors
///
/// All variants are fatal: they abort the process before any unit is dispatched.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config bytes did not match the expected shape
    #[error("Failed to parse config: {0}")]
    Parse(String),

    /// No config file at any default location
    #[error("Configuration file not found, searched: {searched:?}")]
    NotFound { searched: Vec<PathBuf> },
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}

/// Errors scoped to a single dispatch unit
///
/// None of these ever abort the batch; they are recorded in the unit's outcome.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No credential available for the endpoint's model
    #[error("API key for model {model} is not set ({variable})")]
    CredentialMissing { model: String, variable: String },

    /// Request payload could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Network, DNS, TLS or timeout failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("Request failed with status code {status}: {status_text}")]
    RequestFailed {
        status: u16,
        status_text: String,
        body: String,
    },

    /// Response body was not valid JSON of the expected shape
    #[error("Decode error: {0}")]
    Decode(#[source] serde_json::Error),

    /// Response was well-formed but lacked a required element
    #[error("Missing field in response: {0}")]
    MissingField(String),

    /// Unit task panicked or was cancelled by the runtime
    #[error("Unit task did not complete: {0}")]
    Join(String),
}

impl DispatchError {
    /// Stable label for logs and summaries
    pub fn kind(&self) -> &'static str {
        match self {
            DispatchError::CredentialMissing { .. } => "credential_missing",
            DispatchError::Serialization(_) => "serialization_error",
            DispatchError::Transport(_) => "transport_error",
            DispatchError::RequestFailed { .. } => "request_failed",
            DispatchError::Decode(_) => "decode_error",
            DispatchError::MissingField(_) => "missing_field",
            DispatchError::Join(_) => "join_error",
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            DispatchError::RequestFailed { status, .. } => Some(*status),
            DispatchError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias
pub type DispatchResult<T> = Result<T, DispatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = DispatchError::CredentialMissing {
            model: "gpt-4o".to_string(),
            variable: "API_KEY_gpt-4o".to_string(),
        };
        assert_eq!(err.kind(), "credential_missing");
        assert_eq!(DispatchError::MissingField("choices[0]".to_string()).kind(), "missing_field");
        assert_eq!(DispatchError::Join("panicked".to_string()).kind(), "join_error");
    }

    #[test]
    fn test_request_failed_status() {
        let err = DispatchError::RequestFailed {
            status: 503,
            status_text: "Service Unavailable".to_string(),
            body: String::new(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "Request failed with status code 503: Service Unavailable");
        assert_eq!(DispatchError::MissingField("x".to_string()).status(), None);
    }

    #[test]
    fn test_config_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse config"));
    }
}
