//! Static file serving module
//!
//! Index page with generated fallback, and traversal-safe serving of the
//! two demo mounts.

use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::Path;
use tokio::fs;

/// Title shown on the demo page and its fallback
pub const DEMO_TITLE: &str = "Deployable UI Demo";

/// Serve the demo index page, or a generated fallback when it is missing.
///
/// A missing index is a normal state for a fresh checkout, so the fallback
/// is a 200 rather than a server error.
pub async fn serve_index(ctx: &RequestContext<'_>, index_file: &Path) -> Response<Full<Bytes>> {
    let html = match fs::read_to_string(index_file).await {
        Ok(html) => html,
        Err(_) => fallback_page(index_file),
    };
    http::response::build_html_response(html, ctx.is_head)
}

/// Minimal page served when the on-disk index is absent
pub fn fallback_page(expected: &Path) -> String {
    format!(
        r#"<!doctype html>
<html lang="en"><head>
  <meta charset="utf-8" />
  <title>{DEMO_TITLE}</title>
</head><body>
  <h1>{DEMO_TITLE}</h1>
  <p>(Fallback page because <code>{}</code> was not found.)</p>
</body></html>"#,
        expected.display()
    )
}

/// Serve a file from a mounted directory, 404 when absent
pub async fn serve_directory(
    ctx: &RequestContext<'_>,
    dir: &Path,
    route_prefix: &str,
) -> Response<Full<Bytes>> {
    match load_from_directory(dir, ctx.path, route_prefix).await {
        Some((content, content_type)) => {
            http::response::build_asset_response(content, content_type, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Load a file from a mounted directory.
///
/// The request path is stripped of the mount prefix and joined to the
/// directory; the result must canonicalize to a location inside the mount,
/// otherwise the lookup is rejected.
pub async fn load_from_directory(
    dir: &Path,
    path: &str,
    route_prefix: &str,
) -> Option<(Vec<u8>, &'static str)> {
    // Remove leading slash and prevent directory traversal
    let clean_path = path.trim_start_matches('/').replace("..", "");

    // Remove route prefix from path
    let prefix_clean = route_prefix.trim_matches('/');
    let relative_path = if prefix_clean.is_empty() {
        clean_path.as_str()
    } else {
        clean_path
            .strip_prefix(&format!("{prefix_clean}/"))
            .unwrap_or(&clean_path)
    };

    let file_path = dir.join(relative_path);

    // Security: ensure file_path is within the mounted directory
    let dir_canonical = match dir.canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Mount directory not found or inaccessible '{}': {e}",
                dir.display()
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let Ok(file_canonical) = file_path.canonicalize() else {
        return None;
    };
    if !file_canonical.starts_with(&dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {path} -> {}",
            file_canonical.display()
        ));
        return None;
    }
    if !file_canonical.is_file() {
        return None;
    }

    let content = match fs::read(&file_canonical).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                file_canonical.display()
            ));
            return None;
        }
    };

    let content_type = mime::content_type(file_canonical.extension().and_then(|e| e.to_str()));

    Some((content, content_type))
}
