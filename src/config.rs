//! Configuration Management
//!
//! Connection settings for the REST API and the store channels.

use serde::Deserialize;

pub const ENV_BASE_URL: &str = "RESOURCE_STORE_BASE_URL";
pub const ENV_CONSUMER_KEY: &str = "RESOURCE_STORE_CONSUMER_KEY";
pub const ENV_CONSUMER_SECRET: &str = "RESOURCE_STORE_CONSUMER_SECRET";
pub const ENV_BUFFER_SIZE: &str = "RESOURCE_STORE_BUFFER_SIZE";

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration value: {0}")]
    Invalid(String),
    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// API root, e.g. `https://shop.example/wp-json`.
    pub base_url: String,
    #[serde(default)]
    pub consumer_key: Option<String>,
    #[serde(default)]
    pub consumer_secret: Option<String>,
    /// Capacity of each store's request channel.
    #[serde(default = "default_buffer_size")]
    pub buffer_size: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_buffer_size() -> usize {
    32
}

fn default_user_agent() -> String {
    format!("resource-store/{}", env!("CARGO_PKG_VERSION"))
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            consumer_key: None,
            consumer_secret: None,
            buffer_size: default_buffer_size(),
            user_agent: default_user_agent(),
        }
    }

    pub fn with_credentials(mut self, key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.consumer_key = Some(key.into());
        self.consumer_secret = Some(secret.into());
        self
    }

    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `RESOURCE_STORE_*` variables from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_url = lookup(ENV_BASE_URL).ok_or(ConfigError::Missing(ENV_BASE_URL))?;
        let mut config = Self::new(base_url);
        config.consumer_key = lookup(ENV_CONSUMER_KEY);
        config.consumer_secret = lookup(ENV_CONSUMER_SECRET);
        if let Some(size) = lookup(ENV_BUFFER_SIZE) {
            config.buffer_size = size
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("{}={}", ENV_BUFFER_SIZE, size)))?;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::Missing("base_url"));
        }
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid("buffer_size must be positive".to_string()));
        }
        if self.consumer_key.is_some() != self.consumer_secret.is_some() {
            return Err(ConfigError::Invalid(
                "consumer_key and consumer_secret must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_json_applies_defaults() {
        let config = StoreConfig::from_json(r#"{"base_url":"https://shop.example/wp-json"}"#).unwrap();
        assert_eq!(config.buffer_size, 32);
        assert!(config.user_agent.starts_with("resource-store/"));
        assert!(config.consumer_key.is_none());
    }

    #[test]
    fn test_from_json_rejects_half_credentials() {
        let err = StoreConfig::from_json(r#"{"base_url":"https://x","consumer_key":"ck"}"#);
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://shop.example/wp-json"),
            (ENV_CONSUMER_KEY, "ck_1"),
            (ENV_CONSUMER_SECRET, "cs_1"),
            (ENV_BUFFER_SIZE, "8"),
        ]
        .into_iter()
        .collect();
        let config = StoreConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.buffer_size, 8);
        assert_eq!(config.consumer_secret.as_deref(), Some("cs_1"));
    }

    #[test]
    fn test_from_lookup_requires_base_url() {
        let err = StoreConfig::from_lookup(|_| None);
        assert_eq!(err, Err(ConfigError::Missing(ENV_BASE_URL)));
    }

    #[test]
    fn test_from_lookup_rejects_bad_buffer_size() {
        let err = StoreConfig::from_lookup(|name| match name {
            ENV_BASE_URL => Some("https://x".to_string()),
            ENV_BUFFER_SIZE => Some("lots".to_string()),
            _ => None,
        });
        assert!(matches!(err, Err(ConfigError::Invalid(_))));
    }
}
