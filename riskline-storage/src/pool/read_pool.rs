//! Round-robin pool of read-only connections.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::Connection;

use riskline_core::errors::{RisklineResult, StorageError};

use super::pragmas::apply_read_pragmas;
use crate::to_storage_err;

/// N read connections with `query_only` set, handed out round-robin.
pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open `size` read connections to the given database path.
    /// A size of 0 is treated as 1.
    pub fn open(path: &Path, size: usize) -> RisklineResult<Self> {
        let size = size.max(1);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed {
                reason: e.to_string(),
            })?;
            apply_read_pragmas(&conn)?;
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Execute a closure with the next read connection in rotation.
    pub fn with_conn<F, T>(&self, f: F) -> RisklineResult<T>
    where
        F: FnOnce(&Connection) -> RisklineResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|_| to_storage_err("read connection mutex poisoned".to_string()))?;
        f(&guard)
    }
}
