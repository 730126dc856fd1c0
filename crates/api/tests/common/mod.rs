//! Shared helpers for integration tests.
//!
//! Mirrors the production wiring in `main.rs` (same router builder, same
//! middleware stack) so tests exercise exactly what production runs.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::extract::ws::Message;
use axum::http::{header, Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use sqlx::PgPool;
use tower::ServiceExt;

use sketchrelay_api::auth::jwt::{Claims, JwtConfig};
use sketchrelay_api::config::ServerConfig;
use sketchrelay_api::router::build_app_router;
use sketchrelay_api::state::AppState;
use sketchrelay_api::sync::SyncCoordinator;
use sketchrelay_api::ws::WsManager;

/// Secret shared by test tokens and the test server config.
pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
        },
    }
}

/// Build a full `AppState` around the given pool with a fresh registry and
/// coordinator.
pub fn test_state(pool: PgPool) -> AppState {
    AppState {
        pool,
        config: Arc::new(test_config()),
        registry: Arc::new(WsManager::new()),
        sync: Arc::new(SyncCoordinator::new()),
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_state(test_state(pool))
}

/// Build the application router around pre-built state, so a test can keep
/// hold of the registry and coordinator the routes operate on.
pub fn build_test_app_with_state(state: AppState) -> Router {
    let config = state.config.clone();
    build_app_router(state, &config)
}

/// Mint a token the way the external account service does.
pub fn auth_token(user_id: i64) -> String {
    let claims = Claims {
        user_id,
        exp: chrono::Utc::now().timestamp() + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("token encoding should succeed")
}

/// Send a GET request and return the response.
pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Send a POST request, optionally with a Bearer token, and return the
/// response.
pub async fn post(app: Router, uri: &str, token: Option<&str>) -> Response {
    let mut builder = Request::builder().method(Method::POST).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = builder.body(Body::empty()).expect("request should build");
    app.oneshot(request).await.expect("request should succeed")
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

/// Parse a WebSocket text frame into JSON. Panics on non-text frames.
pub fn frame_json(msg: &Message) -> serde_json::Value {
    match msg {
        Message::Text(text) => serde_json::from_str(text.as_str()).expect("frame should be JSON"),
        other => panic!("expected text frame, got: {other:?}"),
    }
}
