//! The scoring orchestrator: normalize, aggregate, assess, persist.

use std::sync::Arc;

use riskline_core::config::ScoringConfig;
use riskline_core::errors::{RisklineResult, ScoringError};
use riskline_core::models::{Observation, ScoredObservation};
use riskline_core::time;
use riskline_core::traits::ScoreStore;

use crate::{average, risk};

/// Scores incoming observations against their trailing history and
/// persists the result.
///
/// The store is an injected capability, so tests run against in-memory
/// doubles. The engine itself is stateless across invocations; concurrent
/// calls for different metrics need no coordination, and same-metric races
/// resolve by last-write-wins at the store (eventual, not linearizable,
/// consistency).
pub struct ScoringEngine {
    store: Arc<dyn ScoreStore>,
    config: ScoringConfig,
}

impl ScoringEngine {
    pub fn new(store: Arc<dyn ScoreStore>) -> Self {
        Self::with_config(store, ScoringConfig::default())
    }

    pub fn with_config(store: Arc<dyn ScoreStore>, config: ScoringConfig) -> Self {
        Self { store, config }
    }

    /// Score one observation and persist it under
    /// `(metric, normalized_timestamp)`.
    ///
    /// Store failures propagate as retryable errors naming the metric and
    /// timestamp being scored; the write is a single atomic put, so no
    /// partial state is left behind. Retry policy belongs to the caller;
    /// there is none here.
    pub fn score_and_persist(
        &self,
        metric: &str,
        value: f64,
        raw_timestamp: &str,
        source_object_key: &str,
    ) -> RisklineResult<ScoredObservation> {
        let timestamp = time::normalize_timestamp(raw_timestamp);

        let moving_avg = average::moving_average(
            self.store.as_ref(),
            metric,
            &timestamp,
            self.config.window_days,
        )
        .map_err(|e| ScoringError::HistoryUnavailable {
            metric: metric.to_string(),
            timestamp: timestamp.clone(),
            reason: e.to_string(),
        })?;

        // A metric's first-ever observation has no baseline: assessed
        // against 0, which yields pct_change 0 / score 0 / normal.
        let assessment = risk::assess(value, moving_avg.unwrap_or(0.0));

        let scored = ScoredObservation {
            metric: metric.to_string(),
            timestamp: timestamp.clone(),
            value,
            moving_avg_30d: moving_avg,
            pct_change: assessment.pct_change,
            risk_score: assessment.risk_score,
            severity: assessment.severity,
            source_object_key: source_object_key.to_string(),
        };

        self.store
            .put_score(&scored)
            .map_err(|e| ScoringError::PersistFailed {
                metric: metric.to_string(),
                timestamp: timestamp.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            metric,
            timestamp = %scored.timestamp,
            risk_score = scored.risk_score,
            severity = %scored.severity,
            "scored observation persisted"
        );

        Ok(scored)
    }

    /// Convenience wrapper for an already-assembled observation.
    pub fn score(
        &self,
        observation: &Observation,
        source_object_key: &str,
    ) -> RisklineResult<ScoredObservation> {
        self.score_and_persist(
            &observation.metric,
            observation.value,
            &observation.timestamp,
            source_object_key,
        )
    }
}
