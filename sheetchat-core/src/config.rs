//! Configuration for the chat-completion client

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Client configuration.
///
/// The API key is an explicit value handed to [`crate::ChatClient`] at
/// construction; the library never reads it from ambient global state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Bearer token for the chat-completion endpoint. Opaque; validated by
    /// the remote service, not locally.
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Range consulted by the reference flow; empty string means the whole
    /// active sheet.
    #[serde(default = "default_range")]
    pub default_range: String,
}

impl ChatConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Default configuration carrying the given API key.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: default_endpoint(),
            model: default_model(),
            temperature: default_temperature(),
            language: default_language(),
            timeout_secs: default_timeout_secs(),
            default_range: default_range(),
        }
    }
}

fn default_endpoint() -> String {
    "https://api.deepseek.com/chat/completions".to_string()
}

fn default_model() -> String {
    "deepseek-chat".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_language() -> String {
    "zh-CN".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_range() -> String {
    "A1:B10".to_string()
}
