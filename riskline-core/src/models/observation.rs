use serde::{Deserialize, Serialize};

/// A single point of a metric's time series, before scoring.
///
/// `timestamp` is kept as a string rather than a parsed instant: the
/// normalizer's pass-through contract means a degraded-but-unique key is
/// legal, and keys sort lexicographically in canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Stable series identifier, e.g. `"inflation_rate_cpi"` or
    /// `"port_congestion_rotterdam"`.
    pub metric: String,
    /// Canonical instant (ISO-8601, UTC, second precision, `Z`-suffixed)
    /// when well-formed.
    pub timestamp: String,
    /// Observed value; finite.
    pub value: f64,
}

impl Observation {
    pub fn new(metric: impl Into<String>, value: f64, timestamp: impl Into<String>) -> Self {
        Self {
            metric: metric.into(),
            timestamp: timestamp.into(),
            value,
        }
    }
}
