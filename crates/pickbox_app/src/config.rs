//! Host configuration
//!
//! Configuration is read from a `pickbox.toml` file and passed explicitly to
//! the backends at construction time:
//!
//! ```toml
//! base_url = "http://127.0.0.1:5055"
//! message_mode = "stack"
//! timeout_ms = 5000
//! ```
//!
//! Every field is optional; missing fields take their defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;

/// Default config file name
pub const CONFIG_FILE: &str = "pickbox.toml";

/// How submission and load messages are shown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageMode {
    /// Show the accumulated message log, newest last
    #[default]
    Stack,
    /// Show only the latest message
    Single,
}

/// Host application configuration
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Message display mode
    pub message_mode: MessageMode,
    /// Request timeout in milliseconds
    pub timeout_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            message_mode: MessageMode::default(),
            timeout_ms: 5000,
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5055".to_string()
}

impl AppConfig {
    /// Load from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Load from `path` if it exists, otherwise use defaults
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("no config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Parse and validate TOML content
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(content)?;
        config.validated()
    }

    /// Override the base URL (e.g. from the command line)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self, ConfigError> {
        self.base_url = base_url.into();
        self.validated()
    }

    /// Normalize and check the configuration
    pub fn validated(mut self) -> Result<Self, ConfigError> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("base_url must not be empty".into()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "base_url must start with http:// or https://, got {:?}",
                trimmed
            )));
        }
        self.base_url = trimmed.to_string();
        if self.timeout_ms == 0 {
            return Err(ConfigError::Invalid("timeout_ms must be positive".into()));
        }
        Ok(self)
    }

    /// Build a URL for an API path (`path` starts with `/`)
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}
