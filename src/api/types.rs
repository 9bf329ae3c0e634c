use serde::{Deserialize, Serialize};

use crate::draw::{RoomId, DEFAULT_POOL_SIZE};
use crate::shared::RelaySummary;

pub const MIN_INTERVAL_SECS: i64 = 5;
pub const MAX_INTERVAL_SECS: i64 = 60;

fn default_pool_size() -> i64 {
    DEFAULT_POOL_SIZE
}

/// Request payload for starting a room's draw
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartDrawRequest {
    pub room: RoomId,
    pub interval: i64,
    #[serde(default = "default_pool_size", alias = "poolSize")]
    pub qty: i64,
    #[serde(default, alias = "startDelaySeconds")]
    pub start_delay: i64,
}

/// Echo of the accepted parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartDrawResponse {
    pub message: String,
    pub data: StartDrawRequest,
}

/// Result of a manual relay connectivity check
#[derive(Debug, Clone, Serialize)]
pub struct RelayCheckResponse {
    pub success: bool,
    pub message: String,
    pub debug: RelaySummary,
}
