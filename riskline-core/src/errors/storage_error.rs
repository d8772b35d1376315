/// Time-series store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to open database: {reason}")]
    OpenFailed { reason: String },

    #[error("migration failed: {reason}")]
    MigrationFailed { reason: String },

    #[error("query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("invalid stored row: {reason}")]
    InvalidRow { reason: String },
}

impl StorageError {
    /// Open and query failures cover timeouts and lock contention, which a
    /// caller may retry. Migration failures and corrupt rows are not
    /// transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            StorageError::OpenFailed { .. } | StorageError::QueryFailed { .. }
        )
    }
}
