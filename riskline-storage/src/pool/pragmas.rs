//! Per-connection PRAGMA setup.

use rusqlite::Connection;

use riskline_core::errors::RisklineResult;

use crate::to_storage_err;

/// Writer settings: WAL so readers proceed during a write, NORMAL sync
/// (durability to the WAL, not to the main db, on every commit), and a
/// 5s busy_timeout so lock contention surfaces as a retryable error
/// instead of an immediate failure.
pub fn apply_pragmas(conn: &Connection) -> RisklineResult<()> {
    conn.execute_batch(
        "
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA foreign_keys = ON;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Reader settings. `query_only` makes a stray write through a read
/// connection an error rather than a serialization hazard.
pub fn apply_read_pragmas(conn: &Connection) -> RisklineResult<()> {
    conn.execute_batch(
        "
        PRAGMA query_only = ON;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
