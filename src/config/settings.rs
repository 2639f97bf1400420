//! Runtime settings
//!
//! Process-level knobs sourced from the environment (and an optional `.env` file)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Main runtime settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// HTTP client configuration
    pub client: ClientSettings,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Per-request timeout in seconds; `None` means no timeout
    pub timeout: Option<u64>,
    /// User-Agent header sent with every request
    pub user_agent: String,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level or filter directive
    pub level: String,
    /// Log format (text/json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
        }
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", crate::NAME, crate::VERSION)
}

impl Settings {
    /// Create settings from the process environment
    pub fn new() -> Result<Self> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get_or_default = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| default.to_string())
        };

        let timeout = match lookup("REQUEST_TIMEOUT") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<u64>()
                    .context("Invalid timeout value")?,
            ),
            _ => None,
        };

        let settings = Self {
            client: ClientSettings {
                timeout,
                user_agent: get_or_default("CHATBATCH_USER_AGENT", &default_user_agent()),
            },
            logging: LoggingConfig {
                level: get_or_default("RUST_LOG", "info"),
                format: get_or_default("LOG_FORMAT", "text"),
            },
        };

        settings.validate()?;

        Ok(settings)
    }

    /// Override the client timeout (e.g. from the command line)
    pub fn with_timeout(mut self, timeout: Option<u64>) -> Result<Self> {
        if timeout.is_some() {
            self.client.timeout = timeout;
            self.validate()?;
        }
        Ok(self)
    }

    /// Validate configuration validity
    fn validate(&self) -> Result<()> {
        if self.client.timeout == Some(0) {
            anyhow::bail!("Timeout value cannot be 0");
        }

        if self.client.user_agent.trim().is_empty() {
            anyhow::bail!("User agent cannot be empty");
        }

        // RUST_LOG may carry full directives ("chatbatch=debug,reqwest=warn"),
        // only a bare level is checked here
        let valid_levels = ["trace", "debug", "info", "warn", "error", "off"];
        if !self.logging.level.contains('=')
            && !self.logging.level.contains(',')
            && !valid_levels.contains(&self.logging.level.to_lowercase().as_str())
        {
            anyhow::bail!("Invalid log level: {}", self.logging.level);
        }

        let valid_formats = ["text", "json"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            anyhow::bail!("Invalid log format: {}", self.logging.format);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(settings.client.timeout, None);
        assert!(settings.client.user_agent.starts_with("chatbatch/"));
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.logging.format, "text");
    }

    #[test]
    fn test_cli_timeout_override() {
        let settings = Settings::from_lookup(lookup_from(&[("REQUEST_TIMEOUT", "30")])).unwrap();
        assert_eq!(settings.client.timeout, Some(30));

        let settings = settings.with_timeout(Some(5)).unwrap();
        assert_eq!(settings.client.timeout, Some(5));

        let settings = settings.with_timeout(None).unwrap();
        assert_eq!(settings.client.timeout, Some(5));

        assert!(settings.with_timeout(Some(0)).is_err());
    }
}
