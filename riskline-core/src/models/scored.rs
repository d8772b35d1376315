//! Scored observation model, the unit persisted by the scoring orchestrator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// An observation plus its derived risk fields.
///
/// Created exactly once, at scoring time, and immutable thereafter.
/// Corrections are new writes under the same `(metric, timestamp)` key,
/// which overwrite (last-write-wins, never merged).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredObservation {
    pub metric: String,
    pub timestamp: String,
    pub value: f64,
    /// Trailing average over the lookback window ending at `timestamp`,
    /// exclusive of `value` itself. `None` when the metric has no prior
    /// history, distinct from a true average of `0`.
    pub moving_avg_30d: Option<f64>,
    /// Percent deviation of `value` from the moving average, rounded to
    /// 2 decimals. `0.0` when the average is zero or absent.
    pub pct_change: f64,
    /// Bounded risk score in `[0, 100]`.
    pub risk_score: u8,
    pub severity: Severity,
    /// Opaque provenance reference to the raw input that produced this
    /// score (audit trail).
    pub source_object_key: String,
}

/// Discrete classification of deviation magnitude.
///
/// Ordering is by increasing severity: `Normal < Warning < Critical`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Normal,
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Severity::Normal),
            "warning" => Ok(Severity::Warning),
            "critical" => Ok(Severity::Critical),
            other => Err(ParseSeverityError(other.to_string())),
        }
    }
}

/// A severity string that is none of `normal`/`warning`/`critical`.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown severity: {0}")]
pub struct ParseSeverityError(pub String);
