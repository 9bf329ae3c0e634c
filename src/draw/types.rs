use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::shared::AppError;

/// Opaque room identifier; one draw session at most per room
pub type RoomId = i64;

/// Pool size used when the caller does not give one
pub const DEFAULT_POOL_SIZE: i64 = 75;

/// Largest pool a session may draw from
pub const MAX_POOL_SIZE: i64 = 10_000;

/// One day; longer intervals or delays are rejected
pub const MAX_WAIT_SECS: i64 = 24 * 60 * 60;

/// Parameter errors raised by `DrawRegistry::start` before any timer exists
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DrawError {
    #[error("interval must be between 1 and {max} seconds, got {0}", max = MAX_WAIT_SECS)]
    InvalidInterval(i64),

    #[error("pool size must be between 1 and {max}, got {0}", max = MAX_POOL_SIZE)]
    InvalidPoolSize(i64),

    #[error("start delay must be between 0 and {max} seconds, got {0}", max = MAX_WAIT_SECS)]
    InvalidStartDelay(i64),
}

impl From<DrawError> for AppError {
    fn from(error: DrawError) -> Self {
        AppError::BadRequest(error.to_string())
    }
}

/// Unvalidated parameters for a new draw session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    pub interval_secs: i64,
    pub pool_size: i64,
    pub start_delay_secs: i64,
}

impl DrawRequest {
    pub fn new(interval_secs: i64, pool_size: i64) -> Self {
        Self {
            interval_secs,
            pool_size,
            start_delay_secs: 0,
        }
    }

    pub fn with_start_delay(mut self, start_delay_secs: i64) -> Self {
        self.start_delay_secs = start_delay_secs;
        self
    }

    pub fn validate(&self) -> Result<DrawSettings, DrawError> {
        if !(1..=MAX_WAIT_SECS).contains(&self.interval_secs) {
            return Err(DrawError::InvalidInterval(self.interval_secs));
        }
        if !(1..=MAX_POOL_SIZE).contains(&self.pool_size) {
            return Err(DrawError::InvalidPoolSize(self.pool_size));
        }
        if !(0..=MAX_WAIT_SECS).contains(&self.start_delay_secs) {
            return Err(DrawError::InvalidStartDelay(self.start_delay_secs));
        }

        Ok(DrawSettings {
            interval: Duration::from_secs(self.interval_secs as u64),
            pool_size: self.pool_size as u32,
            start_delay: Duration::from_secs(self.start_delay_secs as u64),
        })
    }
}

/// Validated session parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawSettings {
    pub interval: Duration,
    pub pool_size: u32,
    pub start_delay: Duration,
}

impl DrawSettings {
    pub fn has_start_delay(&self) -> bool {
        !self.start_delay.is_zero()
    }
}

/// Where a live session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawPhase {
    WaitingDelay,
    Drawing,
}

/// Read-only view of a room's draw session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawSnapshot {
    pub room: RoomId,
    pub pool_size: u32,
    pub interval_secs: u64,
    pub start_delay_secs: u64,
    pub phase: DrawPhase,
    /// Numbers in the order they were drawn
    pub drawn: Vec<u32>,
    pub started_at: DateTime<FixedOffset>,
}
