use serde::{Deserialize, Serialize};

use super::defaults;

/// Scoring subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Trailing window length for the moving average, in days.
    pub window_days: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            window_days: defaults::DEFAULT_MOVING_AVG_WINDOW_DAYS,
        }
    }
}
