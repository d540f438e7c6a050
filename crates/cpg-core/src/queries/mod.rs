//! Read operations behind the dashboard API.
//!
//! Each operation is stateless and re-queries the store; none depends on the
//! result of another.

pub mod functions;
pub mod graph;
pub mod modules;
pub mod packages;
pub mod stats;

pub use functions::query_package_functions;
pub use graph::query_package_graph;
pub use modules::query_modules;
pub use packages::{query_packages, query_packages_by_module};
pub use stats::query_stats;

use crate::error::{CpgError, CpgResult};
use crate::model::{DbStats, FunctionInfo, GraphResponse, ModuleInfo, PackageInfo};
use crate::store::Store;

/// The query layer over a shared read-only [`Store`].
pub struct Explorer {
    store: Store,
}

impl Explorer {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn stats(&self) -> CpgResult<DbStats> {
        self.store.with_conn(query_stats)
    }

    pub fn modules(&self) -> CpgResult<Vec<ModuleInfo>> {
        self.store.with_conn(query_modules)
    }

    /// Package listing, optionally restricted to one module. An empty filter
    /// is the same as no filter.
    pub fn packages(&self, module: Option<&str>) -> CpgResult<Vec<PackageInfo>> {
        match module.filter(|m| !m.is_empty()) {
            Some(module) => self
                .store
                .with_conn(|conn| query_packages_by_module(conn, module)),
            None => self.store.with_conn(query_packages),
        }
    }

    pub fn package_graph(&self) -> CpgResult<GraphResponse> {
        self.store.with_conn(query_package_graph)
    }

    pub fn package_functions(&self, package: &str) -> CpgResult<Vec<FunctionInfo>> {
        if package.is_empty() {
            return Err(CpgError::Validation("missing package name".to_string()));
        }
        self.store
            .with_conn(|conn| query_package_functions(conn, package))
    }
}
