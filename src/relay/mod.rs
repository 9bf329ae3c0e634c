// Outbound delivery to the real-time messaging relay

// Public API - what other modules can use
pub use http::{HttpRelayPublisher, RelayError};
pub use messages::{
    command_event, numbers_event, ControlMessage, DrawMessage, CALLER_CATEGORY, STARTING_COMMAND,
};
pub use publisher::EventPublisher;

// Internal modules
mod http;
mod messages;
mod publisher;
