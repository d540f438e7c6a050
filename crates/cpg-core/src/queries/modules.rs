//! Per-module rollup totals

use std::collections::HashMap;

use rusqlite::Connection;

use crate::error::{CpgError, CpgResult, QueryContext};
use crate::model::ModuleInfo;
use crate::module::{classify, Module};

fn accumulate(total: &mut i64, value: i64) -> CpgResult<()> {
    *total = total.checked_add(value).ok_or(CpgError::Overflow {
        query: "queryModules sum",
    })?;
    Ok(())
}

/// Group non-trivial package rollups by module and sum their totals.
/// Largest module (by LOC) first.
pub fn query_modules(conn: &Connection) -> CpgResult<Vec<ModuleInfo>> {
    let mut stmt = conn
        .prepare(
            "SELECT package, function_count, total_loc, total_complexity
             FROM dashboard_package_treemap
             WHERE total_loc > 0",
        )
        .query_context("queryModules")?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, i64>(2)?,
                row.get::<_, i64>(3)?,
            ))
        })
        .query_context("queryModules")?;

    let mut totals: HashMap<Module, ModuleInfo> = HashMap::new();
    for row in rows {
        let (package, functions, loc, complexity) = row.query_context("queryModules scan")?;
        let module = classify(&package);
        let info = totals.entry(module).or_insert_with(|| ModuleInfo {
            name: module.as_str().to_string(),
            packages: 0,
            functions: 0,
            loc: 0,
            complexity: 0,
        });
        info.packages += 1;
        accumulate(&mut info.functions, functions)?;
        accumulate(&mut info.loc, loc)?;
        accumulate(&mut info.complexity, complexity)?;
    }

    let mut modules: Vec<ModuleInfo> = totals.into_values().collect();
    modules.sort_by(|a, b| b.loc.cmp(&a.loc).then_with(|| a.name.cmp(&b.name)));
    tracing::debug!("queryModules: {} modules", modules.len());
    Ok(modules)
}
