//! HTTP handlers for static asset serving.

use axum::{
    http::{StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::static_assets;

fn asset_response(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    // Hashed bundles can be cached forever, pages must be revalidated
    let cache_control = if path.starts_with("assets/") {
        "public, max-age=31536000, immutable"
    } else {
        "no-cache"
    };

    (
        [(header::CONTENT_TYPE, mime.to_string()), (header::CACHE_CONTROL, cache_control.to_string())],
        data,
    )
        .into_response()
}

/// Serve embedded static assets with SPA fallback
#[instrument(skip_all, fields(path = %uri.path()))]
pub async fn serve_embedded_asset(uri: Uri) -> Response {
    let mut path = uri.path().trim_start_matches('/');

    if path.is_empty() || path.ends_with('/') {
        path = "index.html";
    }

    if let Some(content) = static_assets::Assets::get(path) {
        return asset_response(path, content.data.into_owned());
    }

    // Unknown paths are client-side routes
    debug!("Serving index.html for {}", uri.path());
    match static_assets::Assets::get("index.html") {
        Some(index) => asset_response("index.html", index.data.into_owned()),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, http::StatusCode};
    use axum_test::TestServer;

    fn create_test_server() -> TestServer {
        TestServer::new(Router::new().fallback(serve_embedded_asset)).unwrap()
    }

    fn header<'a>(response: &'a axum_test::TestResponse, name: &str) -> Option<&'a str> {
        response.headers().get(name).map(|v| v.to_str().unwrap())
    }

    #[tokio::test]
    async fn test_serve_root_returns_index_html() {
        let server = create_test_server();

        let response = server.get("/").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(header(&response, "content-type"), Some("text/html"));
        assert_eq!(header(&response, "cache-control"), Some("no-cache"));
        assert!(response.text().contains("<!DOCTYPE html>"));
    }

    #[tokio::test]
    async fn test_serve_favicon() {
        let server = create_test_server();

        let response = server.get("/favicon.svg").await;

        response.assert_status(StatusCode::OK);
        assert_eq!(header(&response, "content-type"), Some("image/svg+xml"));
        assert_eq!(header(&response, "cache-control"), Some("no-cache"));
    }

    #[tokio::test]
    async fn test_client_routes_fall_back_to_index() {
        let server = create_test_server();

        for path in ["/products", "/catalogue/abc", "/signin", "/settings/"] {
            let response = server.get(path).await;
            response.assert_status(StatusCode::OK);
            assert_eq!(header(&response, "content-type"), Some("text/html"));
        }
    }
}
