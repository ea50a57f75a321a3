//! Volley API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use volley_api::routes;
use volley_api::state::AppState;
use volley_api::ticker;
use volley_auth::{IdentityGate, StaticSessionValidator};
use volley_core::clock::SystemClock;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Volley API server");

    // Read configuration from environment.
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let tick_period = match std::env::var("TICK_PERIOD_MS") {
        Ok(raw) => Duration::from_millis(
            raw.parse()
                .map_err(|e| format!("TICK_PERIOD_MS must be a valid u64: {e}"))?,
        ),
        Err(_) => ticker::DEFAULT_TICK_PERIOD,
    };

    // Sessions issued by the external users service, injected as
    // "token=user" pairs until that service is wired in.
    let validator =
        StaticSessionValidator::from_spec(&std::env::var("SESSION_TOKENS").unwrap_or_default());

    // Build application state and start the tick driver.
    let app_state = AppState::new(IdentityGate::new(Arc::new(validator)), Arc::new(SystemClock));
    ticker::spawn(app_state.clone(), tick_period, ticker::STARTUP_DELAY);

    // Build router.
    let app = Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::games::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
