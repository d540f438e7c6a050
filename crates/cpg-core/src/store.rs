//! Read-only access to the graph database.
//!
//! The store is opened with `SQLITE_OPEN_READ_ONLY` and pooled round-robin;
//! nothing in this crate ever writes to it.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use rusqlite::{Connection, OpenFlags};

use crate::error::{CpgError, CpgResult};

/// Default number of read connections.
pub const DEFAULT_POOL_SIZE: usize = 4;

/// Maximum number of read connections.
const MAX_POOL_SIZE: usize = 8;

const READ_PRAGMAS: [&str; 4] = [
    "PRAGMA query_only = ON",
    "PRAGMA busy_timeout = 5000",
    "PRAGMA mmap_size = 268435456",
    "PRAGMA cache_size = -65536",
];

/// Apply read-tuning pragmas. Failures only cost performance, so they are
/// logged and skipped.
fn apply_read_pragmas(conn: &Connection) {
    for pragma in READ_PRAGMAS {
        if let Err(e) = conn.execute_batch(pragma) {
            tracing::warn!("{}: {}", pragma, e);
        }
    }
}

/// A pool of read-only SQLite connections with round-robin selection.
pub struct ReadPool {
    connections: Vec<Mutex<Connection>>,
    next: AtomicUsize,
}

impl ReadPool {
    /// Open `pool_size` read-only connections (clamped to 1..=8).
    pub fn open(path: &Path, pool_size: usize) -> CpgResult<Self> {
        let size = pool_size.clamp(1, MAX_POOL_SIZE);
        let mut connections = Vec::with_capacity(size);
        for _ in 0..size {
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX
                    | OpenFlags::SQLITE_OPEN_URI,
            )
            .map_err(|source| CpgError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            apply_read_pragmas(&conn);
            connections.push(Mutex::new(conn));
        }
        Ok(Self {
            connections,
            next: AtomicUsize::new(0),
        })
    }

    /// Run `f` with the next connection in the rotation. Blocks while that
    /// connection is busy.
    pub fn with_conn<F, T>(&self, f: F) -> CpgResult<T>
    where
        F: FnOnce(&Connection) -> CpgResult<T>,
    {
        let idx = self.next.fetch_add(1, Ordering::Relaxed) % self.connections.len();
        let guard = self.connections[idx]
            .lock()
            .map_err(|_| CpgError::PoolPoisoned)?;
        f(&guard)
    }

    pub fn size(&self) -> usize {
        self.connections.len()
    }
}

/// Handle on the graph database shared by every request.
pub struct Store {
    pool: ReadPool,
    path: PathBuf,
}

impl Store {
    /// Open the database read-only and check that it answers a query.
    pub fn open(path: impl AsRef<Path>, pool_size: usize) -> CpgResult<Self> {
        let path = path.as_ref().to_path_buf();
        let pool = ReadPool::open(&path, pool_size)?;
        pool.with_conn(|conn| {
            conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
                .map_err(|source| CpgError::Open {
                    path: path.clone(),
                    source,
                })
        })?;
        tracing::debug!(
            "Opened {} read-only with {} connections",
            path.display(),
            pool.size()
        );
        Ok(Self { pool, path })
    }

    pub fn with_conn<F, T>(&self, f: F) -> CpgResult<T>
    where
        F: FnOnce(&Connection) -> CpgResult<T>,
    {
        self.pool.with_conn(f)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size()
    }
}
