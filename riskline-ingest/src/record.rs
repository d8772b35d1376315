use serde::{Deserialize, Serialize};

use riskline_core::models::Observation;

/// A normalized observation as produced by the ingestion parsers.
///
/// `source` and `port` are provenance only; they do not participate in
/// scoring or in the store key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub metric: String,
    pub value: f64,
    pub timestamp: String,
    pub source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<String>,
}

impl ObservationRecord {
    /// Strip provenance and hand the point to the scoring pipeline.
    pub fn into_observation(self) -> Observation {
        Observation::new(self.metric, self.value, self.timestamp)
    }
}
