//! Configuration structs with TOML loading.

pub mod defaults;

mod scoring_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{RisklineError, RisklineResult};

pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;

/// Top-level configuration, one section per subsystem.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RisklineConfig {
    pub storage: StorageConfig,
    pub scoring: ScoringConfig,
}

impl RisklineConfig {
    pub fn from_toml_str(text: &str) -> RisklineResult<Self> {
        toml::from_str(text).map_err(|e| RisklineError::Config {
            reason: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> RisklineResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| RisklineError::Config {
            reason: format!("failed to read {}: {e}", path.display()),
        })?;
        Self::from_toml_str(&text)
    }
}
