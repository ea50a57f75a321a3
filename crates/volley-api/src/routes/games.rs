//! Routes for the game directory and running games.
//!
//! Every endpoint except the stream runs the identity gate first and
//! derives its response status from the authentication outcome alone
//! (200 authorized, 401 unauthorized). The business result travels in the
//! body: expected absences are `null`, never an error status, and an
//! unauthenticated caller receives the endpoint's insecure default.

use axum::Json;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::Response;
use axum::{
    Router,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, instrument};

use volley_auth::Identity;
use volley_directory::domain::aggregates::GameInfo;
use volley_physics::GameState;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /api/v1/games.
#[derive(Debug, Deserialize)]
pub struct CreateGameRequest {
    /// Display name for the new game.
    pub name: String,
}

/// Acknowledgement body for the paddle endpoint.
#[derive(Debug, Serialize)]
pub struct DoneResponse {
    pub done: bool,
}

fn done() -> Json<DoneResponse> {
    Json(DoneResponse { done: true })
}

async fn authenticate(state: &AppState, headers: &HeaderMap) -> Option<Identity> {
    let header = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    state.gate.authenticate(header).await
}

/// GET /api/v1/games
#[instrument(skip_all)]
async fn list_games(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Vec<GameInfo>>), ApiError> {
    if authenticate(&state, &headers).await.is_none() {
        return Ok((StatusCode::UNAUTHORIZED, Json(Vec::new())));
    }
    let games = state.directory.list().await?;
    Ok((StatusCode::OK, Json(games)))
}

/// GET /api/v1/games/{id}
#[instrument(skip(state, headers))]
async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Option<GameState>>), ApiError> {
    if authenticate(&state, &headers).await.is_none() {
        return Ok((StatusCode::UNAUTHORIZED, Json(None)));
    }
    let handle = state.games.ref_for(&game_id).await;
    let snapshot = handle.state().await?;
    Ok((StatusCode::OK, Json(snapshot)))
}

/// POST /api/v1/games
#[instrument(skip_all)]
async fn create_game(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateGameRequest>,
) -> Result<(StatusCode, Json<Option<GameInfo>>), ApiError> {
    let Some(identity) = authenticate(&state, &headers).await else {
        return Ok((StatusCode::UNAUTHORIZED, Json(None)));
    };
    let created = state.directory.create(&request.name, &identity.user_id).await?;
    if let Some(info) = &created {
        info!(game_id = %info.id, name = %info.name, "game created");
    }
    Ok((StatusCode::OK, Json(created)))
}

/// POST /api/v1/games/{id}/join
///
/// Joins, then runs the start-if-full chain: once the directory confirms
/// two participants, the game entity serves the ball and the directory is
/// told the game started. The initial snapshot comes back to the joiner.
#[instrument(skip(state, headers))]
async fn join_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Option<GameState>>), ApiError> {
    let Some(identity) = authenticate(&state, &headers).await else {
        return Ok((StatusCode::UNAUTHORIZED, Json(None)));
    };
    let Some(info) = state.directory.join(&game_id, &identity.user_id).await? else {
        return Ok((StatusCode::OK, Json(None)));
    };
    let handle = state.games.ref_for(&info.id).await;
    let started = handle.start(info.clone(), state.clock.millis()).await?;
    if started.is_some() {
        state.directory.mark_started(&info.id).await?;
        info!(game_id = %info.id, "game started");
    }
    Ok((StatusCode::OK, Json(started)))
}

/// POST /api/v1/games/{id}/paddle — body is the target Y as a decimal
/// string.
///
/// Always acknowledged: a malformed target, a non-participant, or a game
/// that is not running all leave the state untouched without signaling
/// failure to the caller.
#[instrument(skip(state, headers, body))]
async fn move_paddle(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    headers: HeaderMap,
    body: String,
) -> Result<(StatusCode, Json<DoneResponse>), ApiError> {
    let Some(identity) = authenticate(&state, &headers).await else {
        return Ok((StatusCode::UNAUTHORIZED, done()));
    };
    match body.trim().parse::<f32>() {
        Ok(target_y) => {
            let handle = state.games.ref_for(&game_id).await;
            handle.move_paddle(&identity.user_id, target_y).await?;
        }
        Err(error) => debug!(%error, "discarding unparseable paddle target"),
    }
    Ok((StatusCode::OK, done()))
}

/// GET /api/v1/games/{id}/stream — WebSocket of tick snapshots.
///
/// Unauthenticated by design; incoming client frames are read and
/// discarded.
async fn stream_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
    ws: WebSocketUpgrade,
) -> Response {
    let ticks = state.hub.subscribe(&game_id);
    ws.on_upgrade(move |socket| stream_ticks(socket, ticks))
}

async fn stream_ticks(mut socket: WebSocket, mut ticks: broadcast::Receiver<GameState>) {
    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(_)) => {}
                Some(Err(_)) | None => break,
            },
            tick = ticks.recv() => match tick {
                Ok(snapshot) => {
                    let Ok(payload) = serde_json::to_string(&snapshot) else {
                        continue;
                    };
                    if socket.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(skipped, "slow subscriber skipped ticks");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
        }
    }
}

/// Returns the router for the games context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_games).post(create_game))
        .route("/{game_id}", get(get_game))
        .route("/{game_id}/join", post(join_game))
        .route("/{game_id}/paddle", post(move_paddle))
        .route("/{game_id}/stream", get(stream_game))
}
