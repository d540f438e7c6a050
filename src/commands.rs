//! CLI command implementations

use std::path::PathBuf;

use anyhow::Context;
use cpg_core::{Explorer, Store};
use cpg_server::{CpgServer, ServerConfig};

pub fn require_db(db: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    db.context("database path required: use --db flag or CPG_DB_PATH env var")
}

pub async fn serve(
    db: PathBuf,
    host: String,
    port: u16,
    pool_size: usize,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    tracing::info!("Database: {}", db.display());

    let store = Store::open(&db, pool_size)?;
    tracing::info!("Opened read-only pool of {} connections", store.pool_size());

    match &static_dir {
        Some(dir) if !dir.join("index.html").is_file() => {
            tracing::warn!("No index.html in {}; SPA fallback will 404", dir.display());
        }
        Some(dir) => tracing::info!("Serving frontend from {}", dir.display()),
        None => tracing::info!("No static directory; serving the API only"),
    }

    let config = ServerConfig {
        host,
        port,
        static_dir,
    };
    CpgServer::new(Explorer::new(store), config).start().await
}

pub fn stats(db: PathBuf) -> anyhow::Result<()> {
    let explorer = Explorer::new(Store::open(&db, 1)?);
    let stats = explorer.stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
