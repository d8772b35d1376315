//! Versioned schema migrations, recorded in `schema_version`.

pub mod v001_initial_schema;

use rusqlite::{params, Connection};

use riskline_core::errors::{RisklineResult, StorageError};

type Migration = fn(&Connection) -> RisklineResult<()>;

const MIGRATIONS: &[(i64, Migration)] = &[(1, v001_initial_schema::migrate)];

/// Apply all migrations newer than the recorded schema version.
pub fn run_migrations(conn: &Connection) -> RisklineResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version     INTEGER PRIMARY KEY,
            applied_at  TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%SZ', 'now'))
        );",
    )
    .map_err(|e| StorageError::MigrationFailed {
        reason: e.to_string(),
    })?;

    let current: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        )
        .map_err(|e| StorageError::MigrationFailed {
            reason: e.to_string(),
        })?;

    for (version, migrate) in MIGRATIONS {
        if *version > current {
            migrate(conn)?;
            conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| StorageError::MigrationFailed {
                reason: e.to_string(),
            })?;
        }
    }
    Ok(())
}
