//! cpg-core — Query and aggregation layer over a pre-computed code-property graph

pub mod error;
pub mod model;
pub mod module;
pub mod queries;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use error::{CpgError, CpgResult};
pub use model::{
    DbStats, EdgeKind, FunctionInfo, GraphEdge, GraphNode, GraphResponse, ModuleInfo, NodeKind,
    PackageInfo,
};
pub use module::{classify, Module};
pub use queries::Explorer;
pub use store::{ReadPool, Store, DEFAULT_POOL_SIZE};
