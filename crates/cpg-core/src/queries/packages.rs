//! Package listings with doc-comment descriptions

use rusqlite::{params, Connection};

use crate::error::{CpgResult, QueryContext};
use crate::model::{PackageInfo, PACKAGE_DOC_PREFIX};
use crate::module::Module;

/// Non-trivial rollups joined to their longest `Package ...` comment.
/// The prefix test is case-sensitive. Equal-length comments resolve to the
/// lowest node id.
const PACKAGES_SQL: &str = "
    SELECT
        t.package,
        t.file_count,
        t.function_count,
        t.type_count,
        t.total_loc,
        t.total_complexity,
        COALESCE(doc.name, '') AS description
    FROM dashboard_package_treemap t
    LEFT JOIN (
        SELECT package, name,
               ROW_NUMBER() OVER (PARTITION BY package ORDER BY LENGTH(name) DESC, id) AS rn
        FROM nodes
        WHERE kind = 'comment' AND substr(name, 1, ?1) = ?2
    ) doc ON doc.package = t.package AND doc.rn = 1
    WHERE t.total_loc > 0
    ORDER BY t.total_loc DESC, t.package";

fn read_packages(conn: &Connection, query: &'static str) -> CpgResult<Vec<PackageInfo>> {
    let mut stmt = conn.prepare(PACKAGES_SQL).query_context(query)?;
    let prefix_len = PACKAGE_DOC_PREFIX.len() as i64;
    let rows = stmt
        .query_map(params![prefix_len, PACKAGE_DOC_PREFIX], |row| {
            Ok(PackageInfo {
                package: row.get(0)?,
                files: row.get(1)?,
                functions: row.get(2)?,
                types: row.get(3)?,
                loc: row.get(4)?,
                complexity: row.get(5)?,
                module: None,
                description: row.get(6)?,
            })
        })
        .query_context(query)?;
    rows.collect::<rusqlite::Result<Vec<_>>>().query_context(query)
}

/// Every package with `total_loc > 0`, largest first.
pub fn query_packages(conn: &Connection) -> CpgResult<Vec<PackageInfo>> {
    let packages = read_packages(conn, "queryPackages")?;
    tracing::debug!("queryPackages: {} packages", packages.len());
    Ok(packages)
}

/// Packages belonging to `module`, each tagged with the module name.
///
/// `other` selects packages that match none of the named modules. A name
/// that is not a known module returns the unfiltered listing untagged.
pub fn query_packages_by_module(conn: &Connection, module: &str) -> CpgResult<Vec<PackageInfo>> {
    let Some(filter) = Module::parse(module) else {
        return query_packages(conn);
    };

    let mut packages = read_packages(conn, "queryPackagesByModule")?;
    packages.retain(|p| filter.matches(&p.package));
    for package in &mut packages {
        package.module = Some(filter.as_str().to_string());
    }
    tracing::debug!(
        "queryPackagesByModule({}): {} packages",
        filter,
        packages.len()
    );
    Ok(packages)
}
