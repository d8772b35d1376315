use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::time;

/// A user's alert subscription on a metric, keyed by `(user_id, metric)`.
///
/// Rule-evaluation and notification delivery are external; this crate only
/// defines the stored shape the alerting collaborator reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub user_id: String,
    pub metric: String,
    /// Threshold percentage the subscriber cares about.
    pub threshold: f64,
    pub enabled: bool,
    pub created_at: String,
}

impl AlertRule {
    /// New enabled rule stamped with the current instant.
    pub fn new(user_id: impl Into<String>, metric: impl Into<String>, threshold: f64) -> Self {
        Self {
            user_id: user_id.into(),
            metric: metric.into(),
            threshold,
            enabled: true,
            created_at: time::to_canonical(&Utc::now()),
        }
    }
}
