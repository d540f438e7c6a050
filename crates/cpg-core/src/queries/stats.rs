//! Global counts over the store

use std::collections::BTreeSet;

use rusqlite::{Connection, Params};

use crate::error::{CpgResult, QueryContext};
use crate::model::{DbStats, FUNC_LITERAL};
use crate::module::classify;

fn count<P: Params>(
    conn: &Connection,
    sql: &str,
    params: P,
    query: &'static str,
) -> CpgResult<i64> {
    conn.query_row(sql, params, |row| row.get(0)).query_context(query)
}

/// Count nodes, edges, non-trivial packages, functions and files, and list
/// the modules present. Each count is an independent read.
pub fn query_stats(conn: &Connection) -> CpgResult<DbStats> {
    let nodes = count(conn, "SELECT COUNT(*) FROM nodes", [], "queryStats nodes")?;
    let edges = count(conn, "SELECT COUNT(*) FROM edges", [], "queryStats edges")?;
    let packages = count(
        conn,
        "SELECT COUNT(*) FROM dashboard_package_treemap WHERE total_loc > 0",
        [],
        "queryStats packages",
    )?;
    let functions = count(
        conn,
        "SELECT COUNT(*) FROM nodes WHERE kind = 'function' AND name != ?1",
        [FUNC_LITERAL],
        "queryStats functions",
    )?;
    let files = count(
        conn,
        "SELECT COUNT(DISTINCT file) FROM nodes WHERE file IS NOT NULL AND file != ''",
        [],
        "queryStats files",
    )?;

    let mut stmt = conn
        .prepare("SELECT package FROM dashboard_package_treemap WHERE total_loc > 0")
        .query_context("queryStats modules")?;
    let mut modules = BTreeSet::new();
    for package in stmt
        .query_map([], |row| row.get::<_, String>(0))
        .query_context("queryStats modules")?
    {
        modules.insert(classify(&package.query_context("queryStats modules scan")?).as_str());
    }

    Ok(DbStats {
        nodes,
        edges,
        packages,
        functions,
        files,
        modules: modules.into_iter().map(str::to_string).collect(),
    })
}
