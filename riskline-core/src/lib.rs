//! riskline-core: shared types, traits, errors, and configuration for the
//! Riskline risk-monitoring pipeline.
//!
//! This crate does no database I/O. It defines:
//! - Models: `Observation`, `ScoredObservation`, `Severity`, `AlertRule`
//! - Storage capabilities: `ScoreStore`, `AlertRuleStore`
//! - The error taxonomy: `RisklineError` and per-subsystem error enums
//! - Configuration structs with TOML loading
//! - Timestamp normalization for heterogeneous vendor date strings

pub mod config;
pub mod errors;
pub mod models;
pub mod telemetry;
pub mod time;
pub mod traits;

// Re-exports for convenience
pub use config::{RisklineConfig, ScoringConfig, StorageConfig};
pub use errors::{
    IngestError, RisklineError, RisklineResult, ScoringError, StorageError,
};
pub use models::{AlertRule, Observation, ParseSeverityError, ScoredObservation, Severity};
pub use traits::{AlertRuleStore, ScoreStore};
