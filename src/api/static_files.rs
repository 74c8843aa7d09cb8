//! Static asset fallback
//!
//! Serves files beneath the configured public root when no API route
//! matches. `/` maps to `index.html`. Content types come from a small
//! fixed extension table; unknown extensions default to plain text.
//! Filesystem errors of any kind are treated as not-found.

use super::server::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::path::Path;
use tracing::debug;

/// Content type from file extension; unknown extensions are plain text
fn mime_type(path: &str) -> &'static str {
    if path.ends_with(".html") {
        "text/html; charset=utf-8"
    } else if path.ends_with(".css") {
        "text/css; charset=utf-8"
    } else if path.ends_with(".js") {
        "application/javascript; charset=utf-8"
    } else if path.ends_with(".json") {
        "application/json; charset=utf-8"
    } else if path.ends_with(".png") {
        "image/png"
    } else if path.ends_with(".svg") {
        "image/svg+xml"
    } else if path.ends_with(".ico") {
        "image/x-icon"
    } else {
        "text/plain; charset=utf-8"
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response()
}

/// Fallback handler wired into the router
pub(crate) async fn static_handler(State(state): State<AppState>, uri: Uri) -> Response {
    serve_asset(&state.config.public_dir, uri.path()).await
}

/// Resolve and serve a request path beneath the asset root
pub(crate) async fn serve_asset(root: &Path, request_path: &str) -> Response {
    let rel = request_path.trim_start_matches('/');
    let rel = if rel.is_empty() { "index.html" } else { rel };

    // Parent-directory components never resolve outside the root
    if rel.split('/').any(|segment| segment == "..") {
        return not_found();
    }

    match tokio::fs::read(root.join(rel)).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, mime_type(rel))], bytes).into_response(),
        Err(e) => {
            debug!("Static lookup failed for {:?}: {}", rel, e);
            not_found()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn asset_root() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "<h1>Mission Control</h1>").unwrap();
        fs::write(dir.path().join("style.css"), "body {}").unwrap();
        fs::write(dir.path().join("notes.txt"), "hello").unwrap();
        dir
    }

    fn content_type(response: &Response) -> &str {
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .unwrap()
            .to_str()
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let root = asset_root();
        let response = serve_asset(root.path(), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(content_type(&response), "text/html; charset=utf-8");
    }

    #[tokio::test]
    async fn test_known_and_unknown_extensions() {
        let root = asset_root();

        let response = serve_asset(root.path(), "/style.css").await;
        assert_eq!(content_type(&response), "text/css; charset=utf-8");

        let response = serve_asset(root.path(), "/notes.txt").await;
        assert_eq!(content_type(&response), "text/plain; charset=utf-8");
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let root = asset_root();
        let response = serve_asset(root.path(), "/nope.html").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_parent_traversal_is_rejected() {
        let root = asset_root();
        let secret = root.path().parent().unwrap().join("secret.txt");
        fs::write(&secret, "secret").unwrap();

        let response = serve_asset(root.path(), "/../secret.txt").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        fs::remove_file(secret).unwrap();
    }
}
