//! Error taxonomy for the Riskline pipeline.
//!
//! Subsystem errors live in their own enums and aggregate into
//! [`RisklineError`] via `#[from]`. Store I/O failures are retryable;
//! malformed-input failures are not. Retry policy itself belongs to the
//! caller; nothing in this workspace retries internally.

mod ingest_error;
mod scoring_error;
mod storage_error;

pub use ingest_error::IngestError;
pub use scoring_error::ScoringError;
pub use storage_error::StorageError;

/// Result alias used across all Riskline crates.
pub type RisklineResult<T> = Result<T, RisklineError>;

/// Top-level error for the Riskline pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RisklineError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("scoring error: {0}")]
    Scoring(#[from] ScoringError),

    #[error("ingest error: {0}")]
    Ingest(#[from] IngestError),

    #[error("config error: {reason}")]
    Config { reason: String },
}

impl RisklineError {
    /// Whether the failure is transient and worth retrying.
    ///
    /// Store unavailability and timeouts are retryable; malformed input,
    /// corrupted rows, and configuration problems are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            RisklineError::Storage(e) => e.is_retryable(),
            RisklineError::Scoring(_) => true,
            RisklineError::Ingest(_) => false,
            RisklineError::Config { .. } => false,
        }
    }
}
