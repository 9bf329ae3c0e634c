#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::time::Instant;

use bingo_caller::EventPublisher;

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub category: String,
    pub event_name: String,
    pub payload: Option<Value>,
    pub at: Instant,
}

impl RecordedEvent {
    pub fn sequence(&self) -> Option<u64> {
        self.payload.as_ref()?.get("sequence")?.as_u64()
    }

    pub fn number(&self) -> Option<u64> {
        self.payload.as_ref()?.get("number")?.as_u64()
    }
}

#[derive(Clone)]
pub struct MockPublisher {
    events: Arc<RwLock<Vec<RecordedEvent>>>,
    succeeds: Arc<RwLock<bool>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
            succeeds: Arc::new(RwLock::new(true)),
        }
    }

    pub async fn set_succeeds(&self, succeeds: bool) {
        *self.succeeds.write().await = succeeds;
    }

    pub async fn events(&self) -> Vec<RecordedEvent> {
        self.events.read().await.clone()
    }

    pub async fn events_named(&self, event_name: &str) -> Vec<RecordedEvent> {
        self.events
            .read()
            .await
            .iter()
            .filter(|e| e.event_name == event_name)
            .cloned()
            .collect()
    }

    pub async fn clear_events(&self) {
        self.events.write().await.clear();
    }
}

#[async_trait]
impl EventPublisher for MockPublisher {
    async fn publish(
        &self,
        category: &str,
        event_name: &str,
        _timestamp: DateTime<FixedOffset>,
        payload: Option<Value>,
    ) -> bool {
        self.events.write().await.push(RecordedEvent {
            category: category.to_string(),
            event_name: event_name.to_string(),
            payload,
            at: Instant::now(),
        });
        *self.succeeds.read().await
    }

    fn name(&self) -> &'static str {
        "MockPublisher"
    }
}
