//! Test utilities for cpg-core

use rusqlite::Connection;
use tempfile::TempDir;

use crate::store::{Store, DEFAULT_POOL_SIZE};

pub const SCHEMA_SQL: &str = include_str!("../testdata/schema.sql");

/// Three packages (`handler`, `store`, `api`), a zero-LOC package and three
/// dependency edges.
pub const FIXTURE_SQL: &str = include_str!("../testdata/fixture.sql");

/// Packages covering every module bucket.
pub const MODULES_SQL: &str = include_str!("../testdata/modules.sql");

/// Write `data` into a fresh database file, then reopen it read-only.
/// Keep the returned `TempDir` alive for as long as the store is used.
pub fn seeded_store(data: &str) -> (TempDir, Store) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cpg.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(data).unwrap();
    drop(conn);

    let store = Store::open(&path, DEFAULT_POOL_SIZE).unwrap();
    (dir, store)
}

pub fn fixture_store() -> (TempDir, Store) {
    seeded_store(FIXTURE_SQL)
}

pub fn modules_store() -> (TempDir, Store) {
    seeded_store(MODULES_SQL)
}

/// A store with the schema but no rows.
pub fn empty_store() -> (TempDir, Store) {
    seeded_store("")
}
