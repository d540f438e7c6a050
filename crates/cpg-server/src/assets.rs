//! Static frontend serving with SPA fallback

use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serve files from `dir`; paths with no matching file get `index.html` so
/// the client-side router can take over.
pub fn static_service(dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")))
}
