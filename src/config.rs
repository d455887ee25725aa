//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every field has a default matching the agent's built-in constants, so
//! running without a config file behaves identically to the defaults;
//! a present-but-invalid file is an error rather than a silent fallback.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub claimer: ClaimerConfig,
    pub pacing: PacingConfig,
    pub retry: RetryConfig,
    pub api: ApiConfig,
}

/// Cycle-level settings: where the credentials live and how often a full
/// pass over them runs.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ClaimerConfig {
    pub token_file: String,
    pub cycle_hours: u64,
}

impl Default for ClaimerConfig {
    fn default() -> Self {
        Self {
            token_file: "token.txt".to_string(),
            cycle_hours: 24,
        }
    }
}

/// Randomized inter-account delay bounds, in whole seconds (inclusive).
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PacingConfig {
    pub min_delay_secs: u64,
    pub max_delay_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            min_delay_secs: 30,
            max_delay_secs: 60,
        }
    }
}

/// Retry behavior for timeout-classified remote failures.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub base_backoff_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_backoff_ms: 10_000,
        }
    }
}

/// Remote service endpoint settings.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    /// Per-request deadline. Exceeding it is the sole retryable failure.
    pub request_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://testnet.humanity.org/api".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// A missing file is not an error — the defaults reproduce the agent's
    /// stock behavior. An unreadable or unparseable file is.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            info!(path, "No config file found, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        let config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {path}"))?;
        Ok(config)
    }
}
