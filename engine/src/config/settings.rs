// Engine settings, loaded from a JSON file or falling back to defaults
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, Result};

/// Environment variable holding the path of the JSON settings file.
pub const CONFIG_ENV_VAR: &str = "BILL_SPLITTER_CONFIG";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct EngineSettings {
    pub host: String,
    pub port: u16,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub limits: ValidationLimits,
}

/// Bounds enforced on requests before they reach the store.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ValidationLimits {
    pub max_title_len: usize,
    pub max_name_len: usize,
    pub max_item_name_len: usize,
    pub max_instagram_len: usize,
    pub max_percent: u32,
    /// Upper bound for an item's line total and for the tip.
    pub max_amount: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            host: "127.0.0.1".to_string(),
            port: 50051,
            log_level: "info".to_string(),
            limits: ValidationLimits::default(),
        }
    }
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            max_title_len: 200,
            max_name_len: 100,
            max_item_name_len: 200,
            max_instagram_len: 100,
            max_percent: 100,
            max_amount: 1_000_000_000,
        }
    }
}

impl EngineSettings {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let settings: EngineSettings = serde_json::from_str(&raw)?;
        settings.check()?;
        tracing::debug!(path = %path.display(), "Loaded engine settings");
        Ok(settings)
    }

    /// Reads the file named by `BILL_SPLITTER_CONFIG`, or returns defaults when unset.
    pub fn load() -> Result<Self> {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) if !path.trim().is_empty() => Self::load_from_file(path.trim()),
            _ => Ok(Self::default()),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn check(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(EngineError::ConfigError("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(EngineError::ConfigError("port must be greater than 0".to_string()));
        }
        if self.limits.max_amount == 0 {
            return Err(EngineError::ConfigError("limits.max_amount must be greater than 0".to_string()));
        }
        if self.limits.max_percent == 0 {
            return Err(EngineError::ConfigError("limits.max_percent must be greater than 0".to_string()));
        }
        Ok(())
    }
}
