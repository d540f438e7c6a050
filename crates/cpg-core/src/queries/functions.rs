//! Functions declared in one package

use rusqlite::{params, Connection};

use crate::error::{CpgError, CpgResult, QueryContext};
use crate::model::{FunctionInfo, FUNC_LITERAL};

/// Named functions of `package`, ordered by name. Anonymous `func literal`
/// nodes are left out.
pub fn query_package_functions(conn: &Connection, package: &str) -> CpgResult<Vec<FunctionInfo>> {
    if package.is_empty() {
        return Err(CpgError::Validation("missing package name".to_string()));
    }

    let mut stmt = conn
        .prepare(
            "SELECT name, COALESCE(file, ''), COALESCE(line, 0)
             FROM nodes
             WHERE package = ?1 AND kind = 'function' AND name != ?2
             ORDER BY name",
        )
        .query_context("queryPackageFunctions")?;
    let functions = stmt
        .query_map(params![package, FUNC_LITERAL], |row| {
            Ok(FunctionInfo {
                name: row.get(0)?,
                file: row.get(1)?,
                line: row.get(2)?,
            })
        })
        .query_context("queryPackageFunctions")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .query_context("queryPackageFunctions scan")?;

    tracing::debug!(
        "queryPackageFunctions({}): {} functions",
        package,
        functions.len()
    );
    Ok(functions)
}
