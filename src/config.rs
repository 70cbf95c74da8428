//! Client configuration file support.
//!
//! Configuration comes from an optional TOML file with per-field
//! defaults, overridden by environment variables so the binary can run
//! with no file at all (`ENGINE_URL`, `POLL_INTERVAL_MS`,
//! `REQUEST_TIMEOUT_SECS`).

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub poll: PollSettings,
}

/// Engine endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Polling settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollSettings {
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_interval_ms() -> u64 {
    2000
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            engine: EngineSettings::default(),
            poll: PollSettings::default(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {}", path.display(), e))?;
        let config: ClientConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("failed to parse config file {}: {}", path.display(), e))?;
        Ok(config)
    }

    /// Load from a file when present, otherwise defaults; then apply
    /// environment overrides on top.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ENGINE_URL") {
            if !url.is_empty() {
                self.engine.base_url = url;
            }
        }
        if let Some(interval) = env_u64("POLL_INTERVAL_MS") {
            self.poll.interval_ms = interval;
        }
        if let Some(timeout) = env_u64("REQUEST_TIMEOUT_SECS") {
            self.engine.request_timeout_secs = timeout;
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll.interval_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.engine.request_timeout_secs)
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
