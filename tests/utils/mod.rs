pub mod mock_relay;
pub mod mocks;

// Re-export main utilities for use by test files
#[allow(unused_imports)]
pub use mock_relay::{MockRelay, RelayBehavior};
#[allow(unused_imports)]
pub use mocks::{MockPublisher, RecordedEvent};
