use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::Serializer;

/// UTC-05:00, America/Bogota (no daylight saving)
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = -5 * 60;

const SECONDS_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const MINUTES_FORMAT: &str = "%Y-%m-%d_%H:%M";

/// Source of local wall-clock timestamps for emitted events
#[derive(Debug, Clone, Copy)]
pub struct LocalClock {
    offset: FixedOffset,
}

impl LocalClock {
    /// Returns `None` when the offset is outside +/- 24h
    pub fn from_offset_minutes(minutes: i32) -> Option<Self> {
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(|offset| Self { offset })
    }

    pub fn now(&self) -> DateTime<FixedOffset> {
        Utc::now().with_timezone(&self.offset)
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Label for the configured zone, e.g. `UTC-05:00`
    pub fn zone_label(&self) -> String {
        format!("UTC{}", self.offset)
    }
}

impl Default for LocalClock {
    fn default() -> Self {
        Self::from_offset_minutes(DEFAULT_UTC_OFFSET_MINUTES).unwrap_or(Self { offset: Utc.fix() })
    }
}

pub fn format_seconds(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(SECONDS_FORMAT).to_string()
}

pub fn format_minutes(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.format(MINUTES_FORMAT).to_string()
}

/// serde `serialize_with` helper rendering a timestamp with seconds precision
pub fn serialize_seconds<S>(
    timestamp: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_seconds(timestamp))
}
