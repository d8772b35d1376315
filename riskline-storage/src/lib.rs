//! riskline-storage: SQLite-backed time-series store for scored
//! observations and alert rules.
//!
//! Connection model: one write connection behind an async mutex
//! (serialized writes), N read connections handed out round-robin with
//! `query_only` set. WAL mode lets readers proceed while a write is in
//! flight. There are no cross-statement transactions in the
//! read-then-write scoring sequence; same-metric races resolve by
//! last-write-wins on the `(metric, timestamp)` key.

pub mod migrations;
pub mod pool;
pub mod queries;

use std::path::Path;

use riskline_core::config::{defaults, StorageConfig};
use riskline_core::errors::{RisklineError, RisklineResult, StorageError};
use riskline_core::models::{AlertRule, ScoredObservation};
use riskline_core::traits::{AlertRuleStore, ScoreStore};

pub use pool::{ConnectionPool, ReadPool, WriteConnection};

/// Wrap a low-level database failure as a retryable query error.
pub fn to_storage_err(reason: String) -> RisklineError {
    RisklineError::Storage(StorageError::QueryFailed { reason })
}

/// The storage engine: owns the connection pool and implements the
/// store capabilities consumed by the scoring pipeline.
pub struct StorageEngine {
    pool: ConnectionPool,
}

impl StorageEngine {
    /// Open (or create) the database at `path` with the default read pool
    /// size, applying pragmas and running migrations.
    pub fn open(path: &Path) -> RisklineResult<Self> {
        Self::from_pool(ConnectionPool::open(path, defaults::DEFAULT_READ_POOL_SIZE)?)
    }

    /// Open using explicit storage configuration.
    pub fn open_with_config(config: &StorageConfig) -> RisklineResult<Self> {
        Self::from_pool(ConnectionPool::open(
            Path::new(&config.db_path),
            config.read_pool_size,
        )?)
    }

    /// Open a shared-cache in-memory database (for testing).
    pub fn open_in_memory() -> RisklineResult<Self> {
        Self::from_pool(ConnectionPool::open_in_memory(
            defaults::DEFAULT_READ_POOL_SIZE,
        )?)
    }

    fn from_pool(pool: ConnectionPool) -> RisklineResult<Self> {
        pool.writer.with_conn_sync(migrations::run_migrations)?;
        Ok(Self { pool })
    }

    /// Access to the underlying pool, for embedders that need direct
    /// connection control (e.g. async write batching).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }
}

impl ScoreStore for StorageEngine {
    fn put_score(&self, score: &ScoredObservation) -> RisklineResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::score_ops::upsert_score(conn, score))
    }

    fn latest(&self, metric: &str) -> RisklineResult<Option<ScoredObservation>> {
        self.pool
            .readers
            .with_conn(|conn| queries::score_ops::latest(conn, metric))
    }

    fn query_range(
        &self,
        metric: &str,
        start: &str,
        end: &str,
        limit: usize,
    ) -> RisklineResult<Vec<ScoredObservation>> {
        self.pool
            .readers
            .with_conn(|conn| queries::score_ops::query_range(conn, metric, start, end, limit))
    }

    fn values_in_window(
        &self,
        metric: &str,
        start: &str,
        end_exclusive: &str,
    ) -> RisklineResult<Vec<f64>> {
        self.pool.readers.with_conn(|conn| {
            queries::score_ops::values_in_window(conn, metric, start, end_exclusive)
        })
    }

    fn list_metrics(&self) -> RisklineResult<Vec<String>> {
        self.pool
            .readers
            .with_conn(queries::score_ops::list_metrics)
    }
}

impl AlertRuleStore for StorageEngine {
    fn put_rule(&self, rule: &AlertRule) -> RisklineResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::rule_ops::upsert_rule(conn, rule))
    }

    fn rules_for_user(&self, user_id: &str) -> RisklineResult<Vec<AlertRule>> {
        self.pool
            .readers
            .with_conn(|conn| queries::rule_ops::rules_for_user(conn, user_id))
    }

    fn rules_for_metric(&self, metric: &str) -> RisklineResult<Vec<AlertRule>> {
        self.pool
            .readers
            .with_conn(|conn| queries::rule_ops::rules_for_metric(conn, metric))
    }

    fn delete_rule(&self, user_id: &str, metric: &str) -> RisklineResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| queries::rule_ops::delete_rule(conn, user_id, metric))
    }
}
