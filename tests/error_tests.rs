//! Error handling tests

use chatbatch::services::{decode_response, RawResponse};
use chatbatch::{ConfigError, DispatchError};
use std::path::PathBuf;

#[test]
fn test_every_kind_is_distinct() {
    let json_err = || serde_json::from_str::<serde_json::Value>("]").unwrap_err();

    let errors = vec![
        DispatchError::CredentialMissing {
            model: "m".to_string(),
            variable: "API_KEY_m".to_string(),
        },
        DispatchError::Serialization(json_err()),
        DispatchError::RequestFailed {
            status: 404,
            status_text: "Not Found".to_string(),
            body: String::new(),
        },
        DispatchError::Decode(json_err()),
        DispatchError::MissingField("choices[0].message.content".to_string()),
        DispatchError::Join("task panicked".to_string()),
    ];

    let mut kinds: Vec<&str> = errors.iter().map(DispatchError::kind).collect();
    kinds.sort_unstable();
    kinds.dedup();
    assert_eq!(kinds.len(), errors.len());
}

#[test]
fn test_credential_missing_message() {
    let err = DispatchError::CredentialMissing {
        model: "gpt-4o".to_string(),
        variable: "API_KEY_gpt-4o".to_string(),
    };
    assert_eq!(err.to_string(), "API key for model gpt-4o is not set (API_KEY_gpt-4o)");
}

#[test]
fn test_decode_errors_from_raw_response() {
    let raw = |status: u16, body: &str| RawResponse {
        status,
        status_text: "Too Many Requests".to_string(),
        body: body.as_bytes().to_vec(),
    };

    let err = decode_response(&raw(429, "slow down")).unwrap_err();
    assert_eq!(err.kind(), "request_failed");
    assert_eq!(err.status(), Some(429));
    assert!(err.to_string().contains("429"));

    let err = decode_response(&raw(200, "nope")).unwrap_err();
    assert_eq!(err.kind(), "decode_error");
    assert_eq!(err.status(), None);
}

#[test]
fn test_config_error_messages() {
    let err = ConfigError::Read {
        path: PathBuf::from("config.json"),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
    };
    assert!(err.to_string().contains("config.json"));
    assert!(std::error::Error::source(&err).is_some());

    let err = ConfigError::NotFound {
        searched: vec![PathBuf::from("config.json")],
    };
    assert!(err.to_string().contains("config.json"));
}
