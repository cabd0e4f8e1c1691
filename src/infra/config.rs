use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::SessionConfig;
use crate::engine::EngineError;

/// Process-wide engine settings.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EngineConfig {
    /// Defaults for rooms created without an explicit config.
    pub session: SessionConfig,
    /// Commands a room actor buffers before senders wait.
    pub room_inbox_capacity: usize,
    /// How often a room actor advances its turn clock.
    pub tick_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session: SessionConfig::default(),
            room_inbox_capacity: 64,
            tick_interval_ms: 1_000,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(s: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            serde_json::from_str(s).map_err(|e| EngineError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|e| EngineError::InvalidConfig(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        self.session.validate().map_err(EngineError::InvalidConfig)?;
        if self.room_inbox_capacity == 0 {
            return Err(EngineError::InvalidConfig("room_inbox_capacity must be positive".into()));
        }
        if self.tick_interval_ms == 0 {
            return Err(EngineError::InvalidConfig("tick_interval_ms must be positive".into()));
        }
        Ok(())
    }
}
