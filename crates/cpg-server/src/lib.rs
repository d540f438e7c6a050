//! HTTP server for the CPG dashboard API

pub mod assets;
pub mod handlers;
pub mod router;


#[cfg(test)]
mod test_utils;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use cpg_core::Explorer;

pub use router::create_router;

/// Where and how the server listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Built frontend to serve for non-API paths.
    pub static_dir: Option<PathBuf>,
}

/// State shared by every request. Read-only after startup.
pub struct ServerState {
    pub explorer: Explorer,
    pub static_dir: Option<PathBuf>,
}

impl ServerState {
    pub fn new(explorer: Explorer) -> Self {
        Self {
            explorer,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }
}

pub struct CpgServer {
    state: Arc<ServerState>,
    config: ServerConfig,
}

impl CpgServer {
    pub fn new(explorer: Explorer, config: ServerConfig) -> Self {
        let state = ServerState::new(explorer).with_static_dir(config.static_dir.clone());
        Self {
            state: Arc::new(state),
            config,
        }
    }

    pub fn state(&self) -> Arc<ServerState> {
        Arc::clone(&self.state)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> anyhow::Result<()> {
        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let app = create_router(self.state);

        tracing::info!("CPG Explorer listening on http://{}", listener.local_addr()?);
        axum::serve(listener, app).await?;
        Ok(())
    }
}
