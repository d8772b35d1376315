/// Scoring orchestrator errors.
///
/// Both variants wrap an underlying store failure and carry the metric and
/// timestamp that were being scored, so ingestion incidents can be
/// root-caused from the error alone.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    #[error("moving-average lookup failed for metric='{metric}', timestamp='{timestamp}': {reason}")]
    HistoryUnavailable {
        metric: String,
        timestamp: String,
        reason: String,
    },

    #[error("failed to persist scored observation for metric='{metric}', timestamp='{timestamp}': {reason}")]
    PersistFailed {
        metric: String,
        timestamp: String,
        reason: String,
    },
}
