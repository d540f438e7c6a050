//! Integration tests for CPG Explorer
//!
//! These tests seed a database file, open it read-only through the public
//! API, and exercise the router and the CLI binary against it.

use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use cpg_core::{Explorer, FunctionInfo, GraphResponse, PackageInfo, Store};
use cpg_server::{create_router, ServerState};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

const SCHEMA_SQL: &str = include_str!("../../crates/cpg-core/testdata/schema.sql");
const FIXTURE_SQL: &str = include_str!("../../crates/cpg-core/testdata/fixture.sql");

fn fixture_db() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("cpg.db");
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch(SCHEMA_SQL).unwrap();
    conn.execute_batch(FIXTURE_SQL).unwrap();
    (dir, path)
}

async fn get_json<T: serde::de::DeserializeOwned>(app: axum::Router, uri: &str) -> T {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK, "{uri}");
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Three packages and three weighted edges through the whole stack.
#[tokio::test]
async fn test_fixture_scenario() {
    let (_dir, path) = fixture_db();
    let store = Store::open(&path, 4).unwrap();
    let app = create_router(Arc::new(ServerState::new(Explorer::new(store))));

    let packages: Vec<PackageInfo> = get_json(app.clone(), "/api/packages").await;
    assert_eq!(packages.len(), 3);

    let graph: GraphResponse = get_json(app.clone(), "/api/packages/graph").await;
    assert_eq!(graph.nodes.len(), 3);
    assert_eq!(graph.edges.len(), 3);
    assert!(graph.edges.iter().all(|e| e.weight > 0));

    let functions: Vec<FunctionInfo> = get_json(app, "/api/packages/functions/handler").await;
    assert_eq!(functions.len(), 3);
    let mut sorted = functions.clone();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    assert_eq!(functions, sorted);
}

/// The store file is untouched by serving requests.
#[tokio::test]
async fn test_store_is_not_modified() {
    let (_dir, path) = fixture_db();
    let before = std::fs::read(&path).unwrap();

    let store = Store::open(&path, 2).unwrap();
    let app = create_router(Arc::new(ServerState::new(Explorer::new(store))));
    for uri in ["/api/stats", "/api/modules", "/api/packages", "/api/packages/graph"] {
        let _: serde_json::Value = get_json(app.clone(), uri).await;
    }

    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_cpg-explorer"))
        .arg("version")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("CPG Explorer"));
}

#[test]
fn test_cli_stats_prints_json() {
    let (_dir, path) = fixture_db();
    let output = Command::new(env!("CARGO_BIN_EXE_cpg-explorer"))
        .args(["stats", "--db"])
        .arg(&path)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["packages"], 3);
    assert_eq!(stats["functions"], 7);
    assert_eq!(stats["modules"], serde_json::json!(["other"]));
}

#[test]
fn test_cli_requires_database() {
    let output = Command::new(env!("CARGO_BIN_EXE_cpg-explorer"))
        .arg("stats")
        .env_remove("CPG_DB_PATH")
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("CPG_DB_PATH"), "{stderr}");
}
