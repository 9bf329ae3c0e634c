use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::clock::serialize_seconds;
use crate::draw::RoomId;

/// Category attached to every event the caller emits
pub const CALLER_CATEGORY: &str = "CALLER";

pub const STARTING_COMMAND: &str = "starting";

/// Event carrying control signals for a room
pub fn command_event(room: RoomId) -> String {
    format!("cmd_{}", room)
}

/// Event carrying drawn numbers for a room
pub fn numbers_event(room: RoomId) -> String {
    format!("nums_{}", room)
}

/// `{ cmd, timestamp }`, sent once a delayed draw is about to begin
#[derive(Debug, Clone, Serialize)]
pub struct ControlMessage {
    pub cmd: &'static str,
    #[serde(serialize_with = "serialize_seconds")]
    pub timestamp: DateTime<FixedOffset>,
}

impl ControlMessage {
    pub fn starting(timestamp: DateTime<FixedOffset>) -> Self {
        Self {
            cmd: STARTING_COMMAND,
            timestamp,
        }
    }
}

/// `{ sequence, number, timestamp }`, one per drawn number
#[derive(Debug, Clone, Serialize)]
pub struct DrawMessage {
    pub sequence: u32,
    pub number: u32,
    #[serde(serialize_with = "serialize_seconds")]
    pub timestamp: DateTime<FixedOffset>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    fn at() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(-5 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 11, 2, 20, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_event_names() {
        assert_eq!(command_event(7), "cmd_7");
        assert_eq!(numbers_event(7), "nums_7");
        assert_eq!(numbers_event(-3), "nums_-3");
    }

    #[test]
    fn test_control_message_shape() {
        let value = serde_json::to_value(ControlMessage::starting(at())).unwrap();
        assert_eq!(
            value,
            json!({ "cmd": "starting", "timestamp": "2024-11-02 20:15:00" })
        );
    }

    #[test]
    fn test_draw_message_shape() {
        let message = DrawMessage {
            sequence: 4,
            number: 61,
            timestamp: at(),
        };
        let value = serde_json::to_value(message).unwrap();
        assert_eq!(
            value,
            json!({ "sequence": 4, "number": 61, "timestamp": "2024-11-02 20:15:00" })
        );
    }
}
