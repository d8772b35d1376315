//! The single writer. All mutations to the database funnel through one
//! connection guarded by an async mutex, so writes are serialized and
//! never contend with each other.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use riskline_core::errors::{RisklineResult, StorageError};

use super::pragmas::apply_pragmas;

/// The write side of the pool: one connection, one lock.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    pub fn open(path: &Path) -> RisklineResult<Self> {
        let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed {
            reason: e.to_string(),
        })?;
        apply_pragmas(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Run `f` while holding the write lock.
    pub async fn with_conn<F, T>(&self, f: F) -> RisklineResult<T>
    where
        F: FnOnce(&Connection) -> RisklineResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Blocking variant for callers outside a runtime (startup,
    /// migrations, the sync store traits).
    pub fn with_conn_sync<F, T>(&self, f: F) -> RisklineResult<T>
    where
        F: FnOnce(&Connection) -> RisklineResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }
}
