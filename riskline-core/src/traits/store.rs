use std::sync::Arc;

use crate::errors::RisklineResult;
use crate::models::{AlertRule, ScoredObservation};

/// Time-series store for scored observations, keyed by `(metric, timestamp)`.
///
/// Passed into the scoring orchestrator as a capability rather than bound at
/// construction from process-wide handles; test doubles implement this
/// trait directly.
pub trait ScoreStore: Send + Sync {
    /// Upsert one scored observation. Colliding keys overwrite
    /// (last-write-wins), never merge. Single atomic put, so no partial
    /// state on failure.
    fn put_score(&self, score: &ScoredObservation) -> RisklineResult<()>;

    /// Most recent observation for `metric` by timestamp, if any.
    fn latest(&self, metric: &str) -> RisklineResult<Option<ScoredObservation>>;

    /// Observations for `metric` with `start <= timestamp <= end`, descending
    /// by timestamp, at most `limit` rows. `start`/`end` may be bare
    /// `YYYY-MM-DD` dates (widened to full-day bounds) or canonical
    /// timestamps.
    fn query_range(
        &self,
        metric: &str,
        start: &str,
        end: &str,
        limit: usize,
    ) -> RisklineResult<Vec<ScoredObservation>>;

    /// Raw values for `metric` with `start <= timestamp < end_exclusive`.
    ///
    /// The moving-average query: the exclusive upper bound keeps an
    /// observation out of its own baseline.
    fn values_in_window(
        &self,
        metric: &str,
        start: &str,
        end_exclusive: &str,
    ) -> RisklineResult<Vec<f64>>;

    /// All distinct metric identifiers ever written, sorted, fully drained
    /// before returning. Scans the whole store; not on any
    /// latency-sensitive path.
    fn list_metrics(&self) -> RisklineResult<Vec<String>>;
}

/// Alert-rule store keyed by `(user_id, metric)`, with a secondary lookup
/// by metric for the alerting collaborator.
pub trait AlertRuleStore: Send + Sync {
    fn put_rule(&self, rule: &AlertRule) -> RisklineResult<()>;
    fn rules_for_user(&self, user_id: &str) -> RisklineResult<Vec<AlertRule>>;
    fn rules_for_metric(&self, metric: &str) -> RisklineResult<Vec<AlertRule>>;
    fn delete_rule(&self, user_id: &str, metric: &str) -> RisklineResult<()>;
}

// Arc delegation, so Arc<StorageEngine> is itself a capability.
impl<T: ScoreStore> ScoreStore for Arc<T> {
    fn put_score(&self, score: &ScoredObservation) -> RisklineResult<()> {
        (**self).put_score(score)
    }
    fn latest(&self, metric: &str) -> RisklineResult<Option<ScoredObservation>> {
        (**self).latest(metric)
    }
    fn query_range(
        &self,
        metric: &str,
        start: &str,
        end: &str,
        limit: usize,
    ) -> RisklineResult<Vec<ScoredObservation>> {
        (**self).query_range(metric, start, end, limit)
    }
    fn values_in_window(
        &self,
        metric: &str,
        start: &str,
        end_exclusive: &str,
    ) -> RisklineResult<Vec<f64>> {
        (**self).values_in_window(metric, start, end_exclusive)
    }
    fn list_metrics(&self) -> RisklineResult<Vec<String>> {
        (**self).list_metrics()
    }
}

impl<T: AlertRuleStore> AlertRuleStore for Arc<T> {
    fn put_rule(&self, rule: &AlertRule) -> RisklineResult<()> {
        (**self).put_rule(rule)
    }
    fn rules_for_user(&self, user_id: &str) -> RisklineResult<Vec<AlertRule>> {
        (**self).rules_for_user(user_id)
    }
    fn rules_for_metric(&self, metric: &str) -> RisklineResult<Vec<AlertRule>> {
        (**self).rules_for_metric(metric)
    }
    fn delete_rule(&self, user_id: &str, metric: &str) -> RisklineResult<()> {
        (**self).delete_rule(user_id, metric)
    }
}
