#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use opus_api::config::{DatabaseConfig, ServerConfig};
use opus_api::router::build_app_router;
use opus_api::state::AppState;
use opus_db::MemoryStyleStore;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "test-internal-key";
pub const TEST_ORIGIN: &str = "http://localhost:3000";

/// Build a test `ServerConfig` with safe defaults.
///
/// The database settings are never dialed; handlers talk to the store
/// injected by [`build_test_app`].
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        internal_api_key: TEST_API_KEY.to_string(),
        cors_origins: vec![TEST_ORIGIN.to_string()],
        request_timeout_secs: 30,
        database: DatabaseConfig {
            url: "postgres://unused@localhost/opus".to_string(),
            password: "unused".to_string(),
            max_connections: 1,
        },
    }
}

/// Build the full application router over an in-memory store.
///
/// Uses the same builder as `main.rs`, so tests exercise the production
/// middleware stack.
pub fn build_test_app(store: Arc<MemoryStyleStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    key: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

/// GET with the valid API key.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(TEST_API_KEY), None).await
}

/// GET with an explicit key (or none).
pub async fn get_with_key(app: Router, uri: &str, key: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, key, None).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(TEST_API_KEY), Some(body)).await
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(TEST_API_KEY), Some(body)).await
}

/// PUT a raw, possibly malformed, body with the valid key.
pub async fn put_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header("x-api-key", TEST_API_KEY)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the uniform error body and return its message.
pub async fn error_message(response: Response<Body>, status: u16) -> String {
    assert_eq!(response.status().as_u16(), status);
    let json = body_json(response).await;
    assert_eq!(json["error"]["status"], status);
    json["error"]["message"].as_str().unwrap().to_string()
}
