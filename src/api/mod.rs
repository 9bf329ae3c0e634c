// Public API - what other modules can use
pub use handlers::{check_relay, get_draw, health, start_draw};
pub use types::{RelayCheckResponse, StartDrawRequest, StartDrawResponse};

// Internal modules
mod handlers;
mod types;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::shared::AppState;

/// Builds the HTTP surface of the service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/datos", post(start_draw))
        .route("/api/draws/:room", get(get_draw))
        .route("/api/test-socket", get(check_relay))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
