//! Response shapes served to the dashboard

use serde::{Deserialize, Serialize};

/// Node name the graph pipeline gives to anonymous/inline functions.
pub const FUNC_LITERAL: &str = "func literal";

/// Prefix that marks a comment node as a package-doc candidate.
pub const PACKAGE_DOC_PREFIX: &str = "Package ";

fn is_zero(n: &i64) -> bool {
    *n == 0
}

/// Discriminates what a graph node represents in a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Package,
}

/// What relationship an edge represents in a response.
///
/// The dependency aggregate is always surfaced as `imports`, whatever the
/// pipeline typed the underlying relation as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    Imports,
}

/// Global counts over the whole store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbStats {
    pub nodes: i64,
    pub edges: i64,
    /// Packages with `total_loc > 0`.
    pub packages: i64,
    /// Function nodes, excluding `func literal` entries.
    pub functions: i64,
    /// Distinct non-empty `file` values.
    pub files: i64,
    /// Distinct classified module names, sorted.
    pub modules: Vec<String>,
}

/// Per-module totals over non-trivial packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleInfo {
    pub name: String,
    pub packages: i64,
    pub functions: i64,
    pub loc: i64,
    pub complexity: i64,
}

/// One row of the per-package rollup, as served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInfo {
    pub package: String,
    pub files: i64,
    pub functions: i64,
    pub types: i64,
    pub loc: i64,
    pub complexity: i64,
    /// Set only when the listing was filtered by module.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,
    /// Longest `Package ...` doc comment for this package.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

/// A package node in the dependency graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    /// Total LOC from the rollup, absent for packages only seen through edges.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<i64>,
}

impl GraphNode {
    pub fn package(id: impl Into<String>, loc: Option<i64>) -> Self {
        let id = id.into();
        GraphNode {
            name: id.clone(),
            id,
            kind: NodeKind::Package,
            line: loc,
        }
    }
}

/// A weighted package-to-package dependency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub weight: i64,
}

/// Package dependency graph. Node order carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphResponse {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

/// A function declared in a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub line: i64,
}
