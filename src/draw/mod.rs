// Per-room timed draws
//
// The registry owns every room's draw state; each running draw has an engine
// task that ticks at the room's cadence and publishes through the relay.

// Public API - what other modules can use
pub use registry::{DrawRegistry, DEFAULT_PUBLISH_TIMEOUT};
pub use types::{
    DrawError, DrawPhase, DrawRequest, DrawSettings, DrawSnapshot, RoomId, DEFAULT_POOL_SIZE,
};

// Internal modules
mod engine;
pub mod generator;
mod registry;
mod types;
