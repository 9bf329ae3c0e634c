// Library crate for the bingo caller service
// This file exposes the public API for integration tests

pub mod api;
pub mod clock;
pub mod config;
pub mod draw;
pub mod relay;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use api::create_router;
pub use clock::LocalClock;
pub use config::{AppConfig, ConfigError, RelayConfig};
pub use draw::{DrawError, DrawPhase, DrawRegistry, DrawRequest, DrawSnapshot, RoomId};
pub use relay::{EventPublisher, HttpRelayPublisher};
pub use shared::{AppError, AppState, RelaySummary};
