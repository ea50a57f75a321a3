//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use volley_api::routes;
use volley_api::state::AppState;
use volley_auth::{IdentityGate, StaticSessionValidator};
use volley_test_support::ManualClock;

/// Tokens the fake users service accepts in every integration test.
pub const ALICE_TOKEN: &str = "token-alice";
pub const BOB_TOKEN: &str = "token-bob";
pub const CAROL_TOKEN: &str = "token-carol";

/// Application state wired with a manual clock and a fixed token table.
pub fn test_state() -> (AppState, ManualClock) {
    let clock = ManualClock::starting_at(1_700_000_000_000);
    let validator = StaticSessionValidator::new([
        (ALICE_TOKEN.to_owned(), "alice".to_owned()),
        (BOB_TOKEN.to_owned(), "bob".to_owned()),
        (CAROL_TOKEN.to_owned(), "carol".to_owned()),
    ]);
    let state = AppState::new(
        IdentityGate::new(Arc::new(validator)),
        Arc::new(clock.clone()),
    );
    (state, clock)
}

/// Build the full app router. Uses the same route structure as `main.rs`.
pub fn build_test_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::games::router())
        .with_state(state)
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request, optionally authenticated, and return the response.
pub async fn get_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", bearer(token));
    }
    let request = builder.body(Body::empty()).unwrap();

    send(app, request).await
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", bearer(token));
    }
    let request = builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    send(app, request).await
}

/// Send a POST request with a plain-text body and return the response.
pub async fn post_text(
    app: Router,
    uri: &str,
    token: Option<&str>,
    body: &str,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method("POST").uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", bearer(token));
    }
    let request = builder.body(Body::from(body.to_owned())).unwrap();

    send(app, request).await
}

/// Create a game as the given token's user and return its id.
pub async fn create_game(app: &Router, token: &str, name: &str) -> String {
    let (status, body) = post_json(
        app.clone(),
        "/api/v1/games",
        Some(token),
        &serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["id"].as_str().unwrap().to_owned()
}
