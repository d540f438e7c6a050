//! CPG Explorer CLI entry point

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "cpg-explorer")]
#[command(about = "Analytics API over a pre-computed code-property graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the dashboard API
    Serve {
        /// Path to the CPG SQLite database
        #[arg(long, env = "CPG_DB_PATH")]
        db: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long, env = "CPG_PORT", default_value = "8080")]
        port: u16,

        /// Host to bind to
        #[arg(long, env = "CPG_HOST", default_value = "0.0.0.0")]
        host: String,

        /// Read connections kept open against the database
        #[arg(long, default_value_t = cpg_core::DEFAULT_POOL_SIZE)]
        pool_size: usize,

        /// Built frontend to serve for non-API paths
        #[arg(long, env = "CPG_STATIC_DIR")]
        static_dir: Option<PathBuf>,
    },
    /// Print global graph statistics as JSON and exit
    Stats {
        /// Path to the CPG SQLite database
        #[arg(long, env = "CPG_DB_PATH")]
        db: Option<PathBuf>,
    },
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "cpg_explorer={log_level},cpg_core={log_level},cpg_server={log_level}"
        ))
    });
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve {
            db,
            port,
            host,
            pool_size,
            static_dir,
        } => {
            tracing::info!("CPG Explorer v{}", env!("CARGO_PKG_VERSION"));
            let db = commands::require_db(db)?;
            commands::serve(db, host, port, pool_size, static_dir).await
        }
        Commands::Stats { db } => {
            let db = commands::require_db(db)?;
            commands::stats(db)
        }
        Commands::Version => {
            println!("CPG Explorer v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
