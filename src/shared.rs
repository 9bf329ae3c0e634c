use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::clock::LocalClock;
use crate::config::RelayConfig;
use crate::draw::DrawRegistry;
use crate::relay::EventPublisher;

/// Non-secret view of the relay settings, for diagnostics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelaySummary {
    pub url: String,
    pub channel: String,
    pub has_token: bool,
}

impl From<&RelayConfig> for RelaySummary {
    fn from(config: &RelayConfig) -> Self {
        Self {
            url: config.endpoint(),
            channel: config.channel.clone(),
            has_token: !config.send_token.is_empty(),
        }
    }
}

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub registry: DrawRegistry,
    pub publisher: Arc<dyn EventPublisher>,
    pub clock: LocalClock,
    pub relay: RelaySummary,
}

impl AppState {
    pub fn new(
        publisher: Arc<dyn EventPublisher>,
        clock: LocalClock,
        relay: RelaySummary,
    ) -> Self {
        Self {
            registry: DrawRegistry::new(Arc::clone(&publisher), clock),
            publisher,
            clock,
            relay,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
