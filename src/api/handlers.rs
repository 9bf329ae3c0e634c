use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument, warn};

use super::types::{
    RelayCheckResponse, StartDrawRequest, StartDrawResponse, MAX_INTERVAL_SECS, MIN_INTERVAL_SECS,
};
use crate::draw::{DrawRequest, DrawSnapshot, RoomId};
use crate::shared::{AppError, AppState};

/// Range checks the HTTP layer owns; the registry re-checks the basics
fn validate_start_request(request: &StartDrawRequest) -> Result<(), AppError> {
    if !(MIN_INTERVAL_SECS..=MAX_INTERVAL_SECS).contains(&request.interval) {
        return Err(AppError::BadRequest(format!(
            "interval must be an integer between {} and {}",
            MIN_INTERVAL_SECS, MAX_INTERVAL_SECS
        )));
    }
    Ok(())
}

/// HTTP handler for starting (or restarting) a room's draw
///
/// POST /api/datos
/// Returns as soon as the draw is scheduled
#[instrument(name = "start_draw", skip(state))]
pub async fn start_draw(
    State(state): State<AppState>,
    Json(request): Json<StartDrawRequest>,
) -> Result<Json<StartDrawResponse>, AppError> {
    validate_start_request(&request)?;

    let draw_request =
        DrawRequest::new(request.interval, request.qty).with_start_delay(request.start_delay);
    state.registry.start(request.room, draw_request).await?;

    info!(
        room = request.room,
        interval = request.interval,
        qty = request.qty,
        start_delay = request.start_delay,
        "Draw scheduled"
    );

    Ok(Json(StartDrawResponse {
        message: "Draw started".to_string(),
        data: request,
    }))
}

/// HTTP handler for inspecting a room's running draw
///
/// GET /api/draws/:room
#[instrument(name = "get_draw", skip(state))]
pub async fn get_draw(
    State(state): State<AppState>,
    Path(room): Path<RoomId>,
) -> Result<Json<DrawSnapshot>, AppError> {
    state
        .registry
        .snapshot(room)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No active draw for room {}", room)))
}

/// HTTP handler that sends a test event to the relay
///
/// GET /api/test-socket
#[instrument(name = "check_relay", skip(state))]
pub async fn check_relay(State(state): State<AppState>) -> Json<RelayCheckResponse> {
    info!(url = %state.relay.url, channel = %state.relay.channel, "Checking relay connection");

    let success = state.publisher.verify_connection(state.clock.now()).await;
    if !success {
        warn!(url = %state.relay.url, "Relay connection check failed");
    }

    Json(RelayCheckResponse {
        success,
        message: if success {
            "Relay connected".to_string()
        } else {
            "Relay connection failed".to_string()
        },
        debug: state.relay.clone(),
    })
}

pub async fn health() -> &'static str {
    "OK"
}
