//! Engine configuration
//!
//! `EngineConfigFile` is the JSON shape, `EngineConfig` is what the engine
//! consumes.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::{EngineError, Result};

/// Default tick period, roughly one frame at 60 Hz
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 16;

/// Application-level engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Period of the built-in tick loop
    pub tick_interval: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(DEFAULT_TICK_INTERVAL_MS),
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval.is_zero() {
            return Err(EngineError::Config(
                "tick interval must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Engine configuration (JSON representation)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfigFile {
    #[serde(default = "default_tick_interval")]
    pub tick_interval_ms: u64,
}

impl Default for EngineConfigFile {
    fn default() -> Self {
        EngineConfigFile {
            tick_interval_ms: default_tick_interval(),
        }
    }
}

impl EngineConfigFile {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Convert to the application-layer config, validating it on the way
    pub fn to_engine_config(&self) -> Result<EngineConfig> {
        let config =
            EngineConfig::new().with_tick_interval(Duration::from_millis(self.tick_interval_ms));
        config.validate()?;
        Ok(config)
    }
}

fn default_tick_interval() -> u64 {
    DEFAULT_TICK_INTERVAL_MS
}
