//! Read/write connection management.
//!
//! One serialized writer, N round-robin readers. Both halves sit behind
//! `Arc` so the scoring engine and any embedder can share them without
//! opening duplicate connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use riskline_core::errors::RisklineResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

pub struct ConnectionPool {
    pub writer: Arc<WriteConnection>,
    pub readers: Arc<ReadPool>,
    pub db_path: Option<PathBuf>,
}

static MEM_DB_SEQ: AtomicUsize = AtomicUsize::new(0);

impl ConnectionPool {
    pub fn open(path: &Path, read_pool_size: usize) -> RisklineResult<Self> {
        let writer = Arc::new(WriteConnection::open(path)?);
        let readers = Arc::new(ReadPool::open(path, read_pool_size)?);
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// In-memory pool for tests.
    ///
    /// The database is named and shared-cache: a plain `:memory:` open
    /// would give the writer and each reader their own private database,
    /// and the readers would never see a single write. The name is
    /// sequenced so concurrently running tests don't share state. The
    /// data lives until the last connection in this pool closes.
    pub fn open_in_memory(read_pool_size: usize) -> RisklineResult<Self> {
        let seq = MEM_DB_SEQ.fetch_add(1, Ordering::Relaxed);
        let uri = format!("file:riskline-mem-{seq}?mode=memory&cache=shared");
        let writer = Arc::new(WriteConnection::open(Path::new(&uri))?);
        let readers = Arc::new(ReadPool::open(Path::new(&uri), read_pool_size)?);
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
