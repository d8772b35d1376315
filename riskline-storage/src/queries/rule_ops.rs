//! CRUD for the `alert_rules` table.

use rusqlite::{params, Connection, Row};

use riskline_core::errors::RisklineResult;
use riskline_core::models::AlertRule;

use crate::to_storage_err;

const RULE_COLUMNS: &str = "user_id, metric, threshold, enabled, created_at";

/// Upsert a rule by `(user_id, metric)`.
pub fn upsert_rule(conn: &Connection, rule: &AlertRule) -> RisklineResult<()> {
    conn.execute(
        "INSERT OR REPLACE INTO alert_rules (user_id, metric, threshold, enabled, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            rule.user_id,
            rule.metric,
            rule.threshold,
            rule.enabled,
            rule.created_at,
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// All rules owned by a user.
pub fn rules_for_user(conn: &Connection, user_id: &str) -> RisklineResult<Vec<AlertRule>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RULE_COLUMNS} FROM alert_rules WHERE user_id = ?1 ORDER BY metric"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![user_id], row_to_rule)
        .map_err(|e| to_storage_err(e.to_string()))?;

    collect(rows)
}

/// All rules subscribed to a metric, via the metric index.
pub fn rules_for_metric(conn: &Connection, metric: &str) -> RisklineResult<Vec<AlertRule>> {
    let mut stmt = conn
        .prepare(&format!(
            "SELECT {RULE_COLUMNS} FROM alert_rules WHERE metric = ?1 ORDER BY user_id"
        ))
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map(params![metric], row_to_rule)
        .map_err(|e| to_storage_err(e.to_string()))?;

    collect(rows)
}

/// Delete a rule; deleting an absent rule is a no-op.
pub fn delete_rule(conn: &Connection, user_id: &str, metric: &str) -> RisklineResult<()> {
    conn.execute(
        "DELETE FROM alert_rules WHERE user_id = ?1 AND metric = ?2",
        params![user_id, metric],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

fn row_to_rule(row: &Row<'_>) -> rusqlite::Result<AlertRule> {
    Ok(AlertRule {
        user_id: row.get(0)?,
        metric: row.get(1)?,
        threshold: row.get(2)?,
        enabled: row.get(3)?,
        created_at: row.get(4)?,
    })
}

fn collect<F>(rows: rusqlite::MappedRows<'_, F>) -> RisklineResult<Vec<AlertRule>>
where
    F: FnMut(&Row<'_>) -> rusqlite::Result<AlertRule>,
{
    let mut rules = Vec::new();
    for row in rows {
        rules.push(row.map_err(|e| to_storage_err(e.to_string()))?);
    }
    Ok(rules)
}
