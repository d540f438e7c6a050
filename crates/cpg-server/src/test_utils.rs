//! Test utilities for cpg-server

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use cpg_core::{Explorer, Store, DEFAULT_POOL_SIZE};
use http_body_util::BodyExt;
use rusqlite::Connection;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::ServerState;

const SCHEMA_SQL: &str = include_str!("../../cpg-core/testdata/schema.sql");
const FIXTURE_SQL: &str = include_str!("../../cpg-core/testdata/fixture.sql");
const MODULES_SQL: &str = include_str!("../../cpg-core/testdata/modules.sql");

fn seeded_state(data: &str) -> (TempDir, Arc<ServerState>) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cpg.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(data).unwrap();
    drop(conn);

    let store = Store::open(&path, DEFAULT_POOL_SIZE).unwrap();
    (dir, Arc::new(ServerState::new(Explorer::new(store))))
}

pub fn fixture_state() -> (TempDir, Arc<ServerState>) {
    seeded_state(FIXTURE_SQL)
}

pub fn modules_state() -> (TempDir, Arc<ServerState>) {
    seeded_state(MODULES_SQL)
}

/// A database file without the graph tables, so every query fails.
pub fn broken_state() -> (TempDir, Arc<ServerState>) {
    seeded_state("DROP TABLE dashboard_package_treemap; DROP TABLE dashboard_package_graph;")
}

/// Issue a GET and return status, headers and the collected body.
pub async fn get(app: Router, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body)
}
