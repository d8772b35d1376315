//! Upsert, latest, range query, window values, and metric listing for the
//! `risk_scores` table.

use rusqlite::{params, Connection, Row};

use riskline_core::errors::RisklineResult;
use riskline_core::models::{ScoredObservation, Severity};

use crate::to_storage_err;

/// Warning threshold for range query result size.
const MAX_RESULT_ROWS: usize = 10_000;

const SCORE_COLUMNS: &str =
    "metric, timestamp, value, moving_avg_30d, pct_change, risk_score, severity, source_object_key";

/// Upsert one scored observation. Colliding `(metric, timestamp)` keys
/// overwrite the whole row: last-write-wins, never merged.
pub fn upsert_score(conn: &Connection, score: &ScoredObservation) -> RisklineResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO risk_scores
         (metric, timestamp, value, moving_avg_30d, pct_change, risk_score, severity, source_object_key)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            score.metric,
            score.timestamp,
            score.value,
            score.moving_avg_30d,
            score.pct_change,
            score.risk_score as i64,
            score.severity.as_str(),
            score.source_object_key,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Most recent observation for a metric, by timestamp.
pub fn latest(conn: &Connection, metric: &str) -> RisklineResult<Option<ScoredObservation>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SCORE_COLUMNS} FROM risk_scores
             WHERE metric = ?1 ORDER BY timestamp DESC LIMIT 1"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut rows = stmt
        .query_map(params![metric], row_to_score)
        .map_err(|e| to_storage_err(e.to_string()))?;

    match rows.next() {
        Some(row) => Ok(Some(row.map_err(|e| to_storage_err(e.to_string()))?)),
        None => Ok(None),
    }
}

/// Observations in `[start, end]` (inclusive bounds), descending by
/// timestamp, at most `limit` rows.
///
/// Bare `YYYY-MM-DD` bounds are widened to full-day coverage before the
/// comparison (`T00:00:00Z` / `T23:59:59Z`).
pub fn query_range(
    conn: &Connection,
    metric: &str,
    start: &str,
    end: &str,
    limit: usize,
) -> RisklineResult<Vec<ScoredObservation>> {
    let start = widen_start(start);
    let end = widen_end(end);

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {SCORE_COLUMNS} FROM risk_scores
             WHERE metric = ?1 AND timestamp >= ?2 AND timestamp <= ?3
             ORDER BY timestamp DESC LIMIT ?4"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![metric, start, end, limit as i64], row_to_score)
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut scores = Vec::new();
    for row in rows {
        scores.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }

    if scores.len() > MAX_RESULT_ROWS {
        tracing::warn!(
            result_count = scores.len(),
            limit = MAX_RESULT_ROWS,
            metric,
            start = %start,
            end = %end,
            "range query returned {} rows, exceeding {} threshold. \
             Consider narrowing the time range or lowering the limit.",
            scores.len(),
            MAX_RESULT_ROWS,
        );
    }

    Ok(scores)
}

/// Raw values with `start <= timestamp < end_exclusive`.
/// The exclusive upper bound keeps an observation out of its own baseline.
pub fn values_in_window(
    conn: &Connection,
    metric: &str,
    start: &str,
    end_exclusive: &str,
) -> RisklineResult<Vec<f64>> {
    let mut stmt = conn
        .prepare(
            "SELECT value FROM risk_scores
             WHERE metric = ?1 AND timestamp >= ?2 AND timestamp < ?3
             ORDER BY timestamp DESC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![metric, start, end_exclusive], |row| {
            row.get::<_, f64>(0)
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut values = Vec::new();
    for row in rows {
        values.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(values)
}

/// All distinct metric identifiers ever written, sorted.
pub fn list_metrics(conn: &Connection) -> RisklineResult<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT DISTINCT metric FROM risk_scores ORDER BY metric")
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut metrics = Vec::new();
    for row in rows {
        metrics.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(metrics)
}

fn row_to_score(row: &Row<'_>) -> rusqlite::Result<ScoredObservation> {
    let severity_str: String = row.get(6)?;
    let severity = severity_str.parse::<Severity>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(6, rusqlite::types::Type::Text, Box::new(e))
    })?;
    Ok(ScoredObservation {
        metric: row.get(0)?,
        timestamp: row.get(1)?,
        value: row.get(2)?,
        moving_avg_30d: row.get(3)?,
        pct_change: row.get(4)?,
        risk_score: row.get::<_, i64>(5)? as u8,
        severity,
        source_object_key: row.get(7)?,
    })
}

fn widen_start(bound: &str) -> String {
    if bound.len() == 10 {
        format!("{bound}T00:00:00Z")
    } else {
        bound.to_string()
    }
}

fn widen_end(bound: &str) -> String {
    if bound.len() == 10 {
        format!("{bound}T23:59:59Z")
    } else {
        bound.to_string()
    }
}
