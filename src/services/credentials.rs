//! Credential resolution
//!
//! Bearer keys are looked up per model, once per unit, and never cached

use std::collections::HashMap;

/// Prefix of the per-model environment variable holding the bearer key
pub const API_KEY_PREFIX: &str = "API_KEY_";

/// Name of the environment variable holding the key for `model`
///
/// The model name is used verbatim, so `gpt-4o` maps to `API_KEY_gpt-4o`.
pub fn credential_variable(model: &str) -> String {
    format!("{}{}", API_KEY_PREFIX, model)
}

/// Source of bearer credentials
pub trait CredentialSource: Send + Sync {
    /// Resolve the key for a model; `None` when absent or empty
    fn resolve(&self, model: &str) -> Option<String>;
}

/// Reads `API_KEY_<model>` from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl CredentialSource for EnvCredentials {
    fn resolve(&self, model: &str) -> Option<String> {
        std::env::var(credential_variable(model))
            .ok()
            .filter(|key| !key.is_empty())
    }
}

/// Fixed model → key map
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    keys: HashMap<String, String>,
}

impl StaticCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a key for a model
    pub fn with_key(mut self, model: impl Into<String>, key: impl Into<String>) -> Self {
        self.keys.insert(model.into(), key.into());
        self
    }
}

impl CredentialSource for StaticCredentials {
    fn resolve(&self, model: &str) -> Option<String> {
        self.keys.get(model).filter(|key| !key.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_variable() {
        assert_eq!(credential_variable("gpt-4o"), "API_KEY_gpt-4o");
        assert_eq!(credential_variable("modelA"), "API_KEY_modelA");
    }

    #[test]
    fn test_env_credentials() {
        std::env::set_var("API_KEY_chatbatch-env-test", "sk-env");
        std::env::set_var("API_KEY_chatbatch-env-empty", "");

        assert_eq!(EnvCredentials.resolve("chatbatch-env-test"), Some("sk-env".to_string()));
        assert_eq!(EnvCredentials.resolve("chatbatch-env-empty"), None);
        assert_eq!(EnvCredentials.resolve("chatbatch-env-absent"), None);

        std::env::remove_var("API_KEY_chatbatch-env-test");
        std::env::remove_var("API_KEY_chatbatch-env-empty");
    }

    #[test]
    fn test_static_credentials() {
        let creds = StaticCredentials::new()
            .with_key("modelA", "key-a")
            .with_key("modelB", "");

        assert_eq!(creds.resolve("modelA"), Some("key-a".to_string()));
        assert_eq!(creds.resolve("modelB"), None);
        assert_eq!(creds.resolve("modelC"), None);
    }
}
