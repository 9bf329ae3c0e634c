use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::publisher::EventPublisher;
use crate::clock::{format_minutes, format_seconds, LocalClock};
use crate::config::RelayConfig;

/// Reasons a single delivery to the relay failed
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Relay returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Relay rejected event: {0}")]
    Rejected(String),
}

/// Request body understood by the relay's message endpoint
#[derive(Debug, Serialize)]
pub struct RelayEnvelope<'a> {
    #[serde(rename = "canal")]
    pub channel: &'a str,
    pub token: &'a str,
    #[serde(rename = "evento")]
    pub event: &'a str,
    #[serde(rename = "mensaje")]
    pub message: Value,
}

/// Message sent when the caller supplies no payload of its own
#[derive(Debug, Serialize)]
struct DefaultMessage {
    #[serde(rename = "fecha")]
    date: String,
    timestamp: String,
    #[serde(rename = "zonaHoraria")]
    zone: String,
    #[serde(rename = "tipo")]
    category: String,
}

/// Publishes events by POSTing them to the relay over HTTP(S)
pub struct HttpRelayPublisher {
    client: Client,
    endpoint: String,
    channel: String,
    send_token: String,
    clock: LocalClock,
}

impl HttpRelayPublisher {
    pub fn new(config: &RelayConfig, clock: LocalClock) -> Result<Self, RelayError> {
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint(),
            channel: config.channel.clone(),
            send_token: config.send_token.clone(),
            clock,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn default_message(&self, category: &str, timestamp: &DateTime<FixedOffset>) -> Value {
        let message = DefaultMessage {
            date: format_minutes(timestamp),
            timestamp: format_seconds(&self.clock.now()),
            zone: self.clock.zone_label(),
            category: category.to_string(),
        };
        serde_json::to_value(message).unwrap_or(Value::Null)
    }

    async fn deliver(&self, envelope: &RelayEnvelope<'_>) -> Result<(), RelayError> {
        let response = self.client.post(&self.endpoint).json(envelope).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            return Err(RelayError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: Value = serde_json::from_str(&body)
            .map_err(|e| RelayError::InvalidResponse(format!("{}: {}", e, body)))?;

        match reply.get("error") {
            Some(error) if is_truthy(error) => Err(RelayError::Rejected(error.to_string())),
            _ => Ok(()),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::String(s) => !s.is_empty(),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[async_trait]
impl EventPublisher for HttpRelayPublisher {
    #[instrument(skip(self, timestamp, payload))]
    async fn publish(
        &self,
        category: &str,
        event_name: &str,
        timestamp: DateTime<FixedOffset>,
        payload: Option<Value>,
    ) -> bool {
        let message = payload.unwrap_or_else(|| self.default_message(category, &timestamp));
        let envelope = RelayEnvelope {
            channel: &self.channel,
            token: &self.send_token,
            event: event_name,
            message,
        };

        debug!(event = %event_name, message = %envelope.message, "Sending event to relay");

        match self.deliver(&envelope).await {
            Ok(()) => {
                info!(event = %event_name, "Event delivered to relay");
                true
            }
            Err(e) => {
                warn!(event = %event_name, error = %e, "Failed to deliver event to relay");
                false
            }
        }
    }

    fn name(&self) -> &'static str {
        "HttpRelayPublisher"
    }
}
