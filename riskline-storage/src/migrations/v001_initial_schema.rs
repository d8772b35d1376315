//! v001: Core tables (risk_scores, alert_rules).

use rusqlite::Connection;

use riskline_core::errors::{RisklineResult, StorageError};

pub fn migrate(conn: &Connection) -> RisklineResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS risk_scores (
            metric             TEXT NOT NULL,
            timestamp          TEXT NOT NULL,
            value              REAL NOT NULL,
            moving_avg_30d     REAL,
            pct_change         REAL NOT NULL,
            risk_score         INTEGER NOT NULL,
            severity           TEXT NOT NULL,
            source_object_key  TEXT NOT NULL DEFAULT '',
            created_at         TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now')),
            PRIMARY KEY (metric, timestamp)
        );

        CREATE INDEX IF NOT EXISTS idx_risk_scores_severity ON risk_scores(severity);

        CREATE TABLE IF NOT EXISTS alert_rules (
            user_id     TEXT NOT NULL,
            metric      TEXT NOT NULL,
            threshold   REAL NOT NULL,
            enabled     INTEGER NOT NULL DEFAULT 1,
            created_at  TEXT NOT NULL,
            PRIMARY KEY (user_id, metric)
        );

        CREATE INDEX IF NOT EXISTS idx_alert_rules_metric ON alert_rules(metric);
        ",
    )
    .map_err(|e| StorageError::MigrationFailed {
        reason: e.to_string(),
    })?;
    Ok(())
}
