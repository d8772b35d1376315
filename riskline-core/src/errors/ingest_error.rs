/// Ingestion parsing errors.
///
/// Every malformed payload becomes a typed error so callers can distinguish
/// "no data" from "bad data". None of these are retryable: resending the
/// same payload yields the same failure.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("invalid JSON payload: {reason}")]
    InvalidJson { reason: String },

    #[error("unsupported content type: {content_type}")]
    UnsupportedContentType { content_type: String },

    #[error("missing required field: {field}")]
    MissingField { field: String },

    #[error("value for metric '{metric}' is not a finite number")]
    NonFiniteValue { metric: String },

    #[error("unrecognized payload shape for source '{source_name}'")]
    UnrecognizedShape { source_name: String },
}
