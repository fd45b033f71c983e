//! Configuration loading, validation, and management for Brushwise.
//!
//! Loads configuration from `~/.brushwise/config.toml` with environment
//! variable overrides. Validates all settings at startup.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use brushwise_core::Catalog;

/// Upper bound for any simulated delay.
pub const MAX_DELAY_MS: u64 = 60_000;

/// The root configuration structure.
///
/// Maps directly to `~/.brushwise/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP shim configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Simulated "thinking" delays per endpoint
    #[serde(default)]
    pub latency: LatencyConfig,

    /// Response catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins. Empty = any origin.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    3001
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: vec![],
        }
    }
}

/// Artificial latency, in milliseconds, applied before each reply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyConfig {
    /// Master switch. When false every delay is zero.
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_practice_feedback_ms")]
    pub practice_feedback_ms: u64,

    #[serde(default = "default_iterate_ms")]
    pub iterate_ms: u64,

    #[serde(default = "default_learning_assistant_ms")]
    pub learning_assistant_ms: u64,

    #[serde(default = "default_community_data_ms")]
    pub community_data_ms: u64,

    #[serde(default = "default_join_ms")]
    pub join_ms: u64,

    #[serde(default = "default_post_ms")]
    pub post_ms: u64,

    #[serde(default = "default_draft_ms")]
    pub draft_ms: u64,
}

fn default_true() -> bool {
    true
}
fn default_practice_feedback_ms() -> u64 {
    1500
}
fn default_iterate_ms() -> u64 {
    1000
}
fn default_learning_assistant_ms() -> u64 {
    1200
}
fn default_community_data_ms() -> u64 {
    800
}
fn default_join_ms() -> u64 {
    1000
}
fn default_post_ms() -> u64 {
    1200
}
fn default_draft_ms() -> u64 {
    1500
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            practice_feedback_ms: default_practice_feedback_ms(),
            iterate_ms: default_iterate_ms(),
            learning_assistant_ms: default_learning_assistant_ms(),
            community_data_ms: default_community_data_ms(),
            join_ms: default_join_ms(),
            post_ms: default_post_ms(),
            draft_ms: default_draft_ms(),
        }
    }
}

impl LatencyConfig {
    /// A configuration with every delay switched off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }

    /// Convert a configured value, honouring the master switch.
    pub fn delay(&self, millis: u64) -> Duration {
        if self.enabled {
            Duration::from_millis(millis)
        } else {
            Duration::ZERO
        }
    }

    fn named(&self) -> [(&'static str, u64); 7] {
        [
            ("practice_feedback_ms", self.practice_feedback_ms),
            ("iterate_ms", self.iterate_ms),
            ("learning_assistant_ms", self.learning_assistant_ms),
            ("community_data_ms", self.community_data_ms),
            ("join_ms", self.join_ms),
            ("post_ms", self.post_ms),
            ("draft_ms", self.draft_ms),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog replacing the built-in one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl AppConfig {
    /// Load configuration from the default path (~/.brushwise/config.toml).
    ///
    /// Environment overrides:
    /// - `BRUSHWISE_PORT` (then `PORT`)
    /// - `BRUSHWISE_HOST`
    /// - `BRUSHWISE_CATALOG`
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_dir().join("config.toml");
        let mut config = Self::load_from(&config_path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup`.
    fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(port) = lookup("BRUSHWISE_PORT").or_else(|| lookup("PORT")) {
            self.gateway.port = port.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!("port override '{port}' is not a valid port"))
            })?;
        }

        if let Some(host) = lookup("BRUSHWISE_HOST") {
            self.gateway.host = host;
        }

        if let Some(path) = lookup("BRUSHWISE_CATALOG") {
            self.catalog.path = Some(path);
        }

        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".brushwise")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gateway.port == 0 {
            return Err(ConfigError::ValidationError("gateway.port must be > 0".into()));
        }

        if self.gateway.host.trim().is_empty() {
            return Err(ConfigError::ValidationError("gateway.host must not be empty".into()));
        }

        for (name, millis) in self.latency.named() {
            if millis > MAX_DELAY_MS {
                return Err(ConfigError::ValidationError(format!(
                    "latency.{name} must be at most {MAX_DELAY_MS} ms"
                )));
            }
        }

        Ok(())
    }

    /// Build the response catalog: the configured file, or the built-in one.
    pub fn load_catalog(&self) -> brushwise_core::Result<Catalog> {
        match &self.catalog.path {
            Some(path) => Catalog::from_path(Path::new(path)),
            None => Catalog::builtin(),
        }
    }

    /// Generate a default config TOML string (for `onboard` command).
    pub fn default_toml() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}
