//! Error types for the query layer

use std::path::PathBuf;

/// Top-level error enum for cpg-core.
#[derive(Debug, thiserror::Error)]
pub enum CpgError {
    /// Malformed request input, detected before touching the store.
    #[error("{0}")]
    Validation(String),

    /// A read against the store failed. `query` names the logical query.
    #[error("{query}: {source}")]
    Query {
        query: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// An aggregate sum left the `i64` range.
    #[error("{query}: integer overflow")]
    Overflow { query: &'static str },

    #[error("open database {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("read pool lock poisoned")]
    PoolPoisoned,
}

impl CpgError {
    pub fn is_validation(&self) -> bool {
        matches!(self, CpgError::Validation(_))
    }
}

pub type CpgResult<T> = Result<T, CpgError>;

/// Attach the logical query name to a rusqlite failure.
pub(crate) trait QueryContext<T> {
    fn query_context(self, query: &'static str) -> CpgResult<T>;
}

impl<T> QueryContext<T> for rusqlite::Result<T> {
    fn query_context(self, query: &'static str) -> CpgResult<T> {
        self.map_err(|source| CpgError::Query { query, source })
    }
}
