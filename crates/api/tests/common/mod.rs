#![allow(dead_code)]

//! Shared helpers for HTTP integration tests.
//!
//! [`build_test_app`] mirrors the router construction in `main.rs`
//! (including catalog snapshot loading) so tests exercise the same
//! middleware stack and state that production uses.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use restring_api::config::ServerConfig;
use restring_api::router::build_app_router;
use restring_api::state::AppState;
use restring_db::repositories::CatalogRepo;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers and
/// freshly loaded catalog snapshots, using the given database pool.
pub async fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let string_catalog = CatalogRepo::load_string_catalog(&pool)
        .await
        .expect("string catalog loads");
    let racquet_catalog = CatalogRepo::load_racquet_catalog(&pool)
        .await
        .expect("racquet catalog loads");

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        string_catalog: Arc::new(string_catalog),
        racquet_catalog: Arc::new(racquet_catalog),
    };

    build_app_router(state, &config)
}

/// Send a GET request to the app.
pub async fn get(app: Router, uri: &str) -> Response {
    request(app, Method::GET, uri, None).await
}

/// Send a POST request with a JSON body.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::POST, uri, Some(body)).await
}

/// Send a PUT request with a JSON body.
pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    request(app, Method::PUT, uri, Some(body)).await
}

/// Send a DELETE request to the app.
pub async fn delete(app: Router, uri: &str) -> Response {
    request(app, Method::DELETE, uri, None).await
}

async fn request(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).expect("request builds"))
        .await
        .expect("infallible service")
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}
