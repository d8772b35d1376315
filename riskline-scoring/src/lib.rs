//! riskline-scoring: the risk engine, moving-average aggregator, and
//! scoring orchestrator.
//!
//! Each `score_and_persist` invocation is self-contained given the store:
//! no shared in-process mutable state, no internal retries, no locks
//! across the read-then-write sequence. Same-metric races resolve by
//! last-write-wins at the store.

pub mod average;
pub mod engine;
pub mod risk;

pub use average::moving_average;
pub use engine::ScoringEngine;
pub use risk::{assess, percent_change, risk_score, severity, RiskAssessment};
