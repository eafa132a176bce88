//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method validation, matching
//! against the fixed route table, and dispatching.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http;
use crate::logger;
use crate::paths::DemoPaths;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use serde::Serialize;
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling.
///
/// Generic over the body type: the demo never reads request bodies, and
/// tests construct requests without a `hyper::body::Incoming`.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    if !matches!(*method, Method::GET | Method::HEAD) {
        logger::log_warning(&format!("Method not allowed: {method}"));
        return Ok(http::build_405_response());
    }

    let ctx = RequestContext { path, is_head };
    let response = route_request(&ctx, &state.paths).await;

    if state.access_log {
        logger::log_access(
            method,
            path,
            response.status().as_u16(),
            response_bytes(&response),
        );
    }

    Ok(response)
}

/// Body length for the access log; `Full` always knows its exact size
fn response_bytes(response: &Response<Full<Bytes>>) -> u64 {
    hyper::body::Body::size_hint(response.body())
        .exact()
        .unwrap_or(0)
}

/// Route request against the fixed table, most specific first
pub async fn route_request(
    ctx: &RequestContext<'_>,
    paths: &DemoPaths,
) -> Response<Full<Bytes>> {
    match ctx.path {
        "/" => static_files::serve_index(ctx, &paths.index_file).await,
        // Convenience alias: /demo -> /
        "/demo" => http::build_redirect_response("/"),
        // Silence browser 404 noise without shipping an icon
        "/favicon.ico" => http::build_no_content_response(),
        "/health" | "/healthz" => http::build_json_response(&HealthStatus::new(paths)),
        _ => match mounted_dir(ctx.path, paths) {
            Some((prefix, dir)) => static_files::serve_directory(ctx, dir, prefix).await,
            None => http::build_404_response(),
        },
    }
}

/// Match a path against the two directory mounts
fn mounted_dir<'p>(path: &str, paths: &'p DemoPaths) -> Option<(&'static str, &'p std::path::Path)> {
    if path.starts_with("/static/") {
        Some(("/static", &paths.static_dir))
    } else if path.starts_with("/js/") {
        Some(("/js", &paths.js_dir))
    } else {
        None
    }
}

/// Operator diagnostics payload for `/health` and `/healthz`.
///
/// Reports the resolved directories and whether the index exists; must
/// never fail, even when the directories are missing.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    status: &'static str,
    root: String,
    demo_dir: String,
    html_dir: String,
    js_dir: String,
    index_exists: bool,
    static_dir: String,
}

impl HealthStatus {
    pub fn new(paths: &DemoPaths) -> Self {
        Self {
            status: "ok",
            root: paths.root.display().to_string(),
            demo_dir: paths.demo_dir.display().to_string(),
            html_dir: paths.html_dir.display().to_string(),
            js_dir: paths.js_dir.display().to_string(),
            index_exists: paths.index_exists(),
            static_dir: paths.static_dir.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use http_body_util::BodyExt;
    use std::fs;
    use std::path::Path;

    async fn body_string(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn populated_root(tmp: &Path) -> DemoPaths {
        let paths = DemoPaths::resolve(tmp);
        fs::create_dir_all(&paths.html_dir).unwrap();
        fs::create_dir_all(&paths.js_dir).unwrap();
        fs::create_dir_all(paths.static_dir.join("css")).unwrap();
        fs::write(
            &paths.index_file,
            "<html><title>Deployable UI Demo</title></html>",
        )
        .unwrap();
        fs::write(paths.js_dir.join("main.js"), b"console.log('demo');").unwrap();
        fs::write(paths.static_dir.join("css/ui.css"), b".ui-button {}").unwrap();
        paths
    }

    fn get(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            is_head: false,
        }
    }

    #[tokio::test]
    async fn test_index_served_when_present() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = populated_root(tmp.path());

        let resp = route_request(&get("/"), &paths).await;
        assert_eq!(resp.status(), 200);
        assert!(body_string(resp).await.contains("Deployable UI Demo"));
    }

    #[tokio::test]
    async fn test_missing_index_serves_fallback() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DemoPaths::resolve(tmp.path());

        let resp = route_request(&get("/"), &paths).await;
        assert_eq!(resp.status(), 200);
        let body = body_string(resp).await;
        assert!(body.contains("Deployable UI Demo"));
        assert!(body.contains("demo/html/index.html"));
    }

    #[tokio::test]
    async fn test_demo_redirects_to_root() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DemoPaths::resolve(tmp.path());

        let resp = route_request(&get("/demo"), &paths).await;
        assert!(resp.status().is_redirection());
        assert_eq!(resp.headers().get("Location").unwrap(), "/");
    }

    #[tokio::test]
    async fn test_favicon_is_silenced() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DemoPaths::resolve(tmp.path());

        let resp = route_request(&get("/favicon.ico"), &paths).await;
        assert_eq!(resp.status(), 204);
    }

    #[tokio::test]
    async fn test_health_ok_even_without_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DemoPaths::resolve(tmp.path());

        for route in ["/health", "/healthz"] {
            let resp = route_request(&get(route), &paths).await;
            assert_eq!(resp.status(), 200);
            let payload: serde_json::Value =
                serde_json::from_str(&body_string(resp).await).unwrap();
            assert_eq!(payload["status"], "ok");
            assert_eq!(payload["index_exists"], false);
            assert_eq!(
                payload["root"].as_str().unwrap(),
                tmp.path().display().to_string()
            );
            assert!(payload["demo_dir"].as_str().unwrap().ends_with("demo"));
        }
    }

    #[tokio::test]
    async fn test_static_mount_serves_exact_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = populated_root(tmp.path());

        let resp = route_request(&get("/static/css/ui.css"), &paths).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(resp.headers().get("Content-Type").unwrap(), "text/css");
        assert_eq!(body_string(resp).await, ".ui-button {}");
    }

    #[tokio::test]
    async fn test_js_mount_serves_demo_scripts() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = populated_root(tmp.path());

        let resp = route_request(&get("/js/main.js"), &paths).await;
        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").unwrap(),
            "application/javascript"
        );
    }

    #[tokio::test]
    async fn test_missing_asset_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = populated_root(tmp.path());

        let resp = route_request(&get("/static/css/absent.css"), &paths).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = DemoPaths::resolve(tmp.path());

        let resp = route_request(&get("/admin"), &paths).await;
        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_non_get_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let cfg = Config::from_args(Vec::new()).unwrap();
        let state = Arc::new(AppState::new(&cfg, DemoPaths::resolve(tmp.path())));

        let req = Request::builder()
            .method(Method::POST)
            .uri("/")
            .body(())
            .unwrap();
        let resp = handle_request(req, state).await.unwrap();
        assert_eq!(resp.status(), 405);
        assert_eq!(resp.headers().get("Allow").unwrap(), "GET, HEAD");
    }

    #[tokio::test]
    async fn test_access_log_bytes_match_body() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = populated_root(tmp.path());

        let resp = route_request(&get("/static/css/ui.css"), &paths).await;
        let bytes = response_bytes(&resp);
        assert_eq!(bytes, body_string(resp).await.len() as u64);

        let head = RequestContext {
            path: "/static/css/ui.css",
            is_head: true,
        };
        let resp = route_request(&head, &paths).await;
        assert_eq!(response_bytes(&resp), 0);
    }

    #[tokio::test]
    async fn test_head_returns_empty_body_with_length() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = populated_root(tmp.path());

        let ctx = RequestContext {
            path: "/",
            is_head: true,
        };
        let resp = route_request(&ctx, &paths).await;
        assert_eq!(resp.status(), 200);
        assert!(resp.headers().contains_key("Content-Length"));
        assert!(body_string(resp).await.is_empty());
    }
}
