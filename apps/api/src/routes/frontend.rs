use std::path::Path;

use tower_http::services::{ServeDir, ServeFile};

/// Serves the built frontend bundle. Any path that is not a file falls back to
/// `index.html` with a 200, so client-side routes load the app.
pub fn frontend_service(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")))
}
