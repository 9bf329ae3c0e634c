use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::{json, Value};

/// Outbound side of the service: delivers a named event to the messaging relay.
///
/// Delivery is best effort. Implementations never return an error; every
/// failure (transport, status, malformed reply) is logged and reported as
/// `false` so callers can carry on with their cadence.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(
        &self,
        category: &str,
        event_name: &str,
        timestamp: DateTime<FixedOffset>,
        payload: Option<Value>,
    ) -> bool;

    /// Sends a throwaway event to check the relay accepts our credentials
    async fn verify_connection(&self, timestamp: DateTime<FixedOffset>) -> bool {
        self.publish(
            "TEST",
            "connection_test",
            timestamp,
            Some(json!({ "test": true })),
        )
        .await
    }

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
