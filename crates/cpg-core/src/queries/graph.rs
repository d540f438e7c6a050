//! Package dependency graph

use std::collections::HashMap;

use indexmap::IndexSet;
use rusqlite::Connection;

use crate::error::{CpgResult, QueryContext};
use crate::model::{EdgeKind, GraphEdge, GraphNode, GraphResponse};

/// Build the package graph from the dependency aggregate.
///
/// Nodes are the distinct edge endpoints, annotated with rollup LOC where a
/// rollup row exists. Endpoints without a rollup become bare nodes. Any read
/// failure discards the partial graph.
pub fn query_package_graph(conn: &Connection) -> CpgResult<GraphResponse> {
    let mut stmt = conn
        .prepare("SELECT source, target, weight FROM dashboard_package_graph ORDER BY weight DESC")
        .query_context("queryPackageGraph edges")?;
    let edge_rows = stmt
        .query_map([], |row| {
            Ok(GraphEdge {
                source: row.get(0)?,
                target: row.get(1)?,
                kind: EdgeKind::Imports,
                weight: row.get(2)?,
            })
        })
        .query_context("queryPackageGraph edges")?;

    let mut edges = Vec::new();
    let mut endpoints: IndexSet<String> = IndexSet::new();
    for edge in edge_rows {
        let edge = edge.query_context("queryPackageGraph edge scan")?;
        endpoints.insert(edge.source.clone());
        endpoints.insert(edge.target.clone());
        edges.push(edge);
    }

    let mut stmt = conn
        .prepare("SELECT package, total_loc FROM dashboard_package_treemap")
        .query_context("queryPackageGraph treemap")?;
    let loc_by_package = stmt
        .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
        .query_context("queryPackageGraph treemap")?
        .collect::<rusqlite::Result<HashMap<_, _>>>()
        .query_context("queryPackageGraph treemap scan")?;

    let nodes = endpoints
        .into_iter()
        .map(|package| {
            let loc = loc_by_package.get(&package).copied();
            GraphNode::package(package, loc)
        })
        .collect::<Vec<_>>();

    tracing::debug!(
        "queryPackageGraph: {} nodes, {} edges",
        nodes.len(),
        edges.len()
    );
    Ok(GraphResponse { nodes, edges })
}
