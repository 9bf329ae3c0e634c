#![allow(dead_code)]

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{oneshot, RwLock};

use bingo_caller::RelayConfig;

/// How the mock relay answers each message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayBehavior {
    Accept,
    RejectWithError,
    ServerError,
    NotJson,
    Hang,
}

#[derive(Clone)]
struct MockRelayState {
    received: Arc<RwLock<Vec<Value>>>,
    behavior: Arc<RwLock<RelayBehavior>>,
}

/// Handle to a relay stand-in listening on a random local port.
/// The server shuts down when the handle is dropped.
pub struct MockRelay {
    pub base_url: String,
    state: MockRelayState,
    _shutdown_tx: oneshot::Sender<()>,
}

impl MockRelay {
    pub async fn start() -> Self {
        let state = MockRelayState {
            received: Arc::new(RwLock::new(Vec::new())),
            behavior: Arc::new(RwLock::new(RelayBehavior::Accept)),
        };

        let app = Router::new()
            .route("/enviar-mensaje", post(receive))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock relay");
        let addr = listener.local_addr().expect("Failed to get local address");

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Mock relay failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            _shutdown_tx: shutdown_tx,
        }
    }

    pub fn config(&self) -> RelayConfig {
        RelayConfig {
            base_url: self.base_url.clone(),
            channel: "bingo-test".to_string(),
            send_token: "send-secret".to_string(),
            timeout: Duration::from_secs(1),
        }
    }

    pub async fn set_behavior(&self, behavior: RelayBehavior) {
        *self.state.behavior.write().await = behavior;
    }

    pub async fn received(&self) -> Vec<Value> {
        self.state.received.read().await.clone()
    }
}

async fn receive(State(state): State<MockRelayState>, Json(body): Json<Value>) -> Response {
    state.received.write().await.push(body);
    let behavior = *state.behavior.read().await;

    match behavior {
        RelayBehavior::Accept => Json(json!({ "ok": true })).into_response(),
        RelayBehavior::RejectWithError => Json(json!({ "error": "invalid token" })).into_response(),
        RelayBehavior::ServerError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "relay down").into_response()
        }
        RelayBehavior::NotJson => (StatusCode::OK, "delivered").into_response(),
        RelayBehavior::Hang => {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(json!({ "ok": true })).into_response()
        }
    }
}
