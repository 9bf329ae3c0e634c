use std::time::Duration;
use thiserror::Error;

use crate::clock::{LocalClock, DEFAULT_UTC_OFFSET_MINUTES};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_RELAY_TIMEOUT_SECS: u64 = 4;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Connection settings for the real-time messaging relay
#[derive(Clone)]
pub struct RelayConfig {
    pub base_url: String,
    pub channel: String,
    pub send_token: String,
    pub timeout: Duration,
}

impl RelayConfig {
    /// Full URL of the relay's message endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/enviar-mensaje", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for RelayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelayConfig")
            .field("base_url", &self.base_url)
            .field("channel", &self.channel)
            .field("send_token", &"********")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Process configuration, read from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub relay: RelayConfig,
    pub clock: LocalClock,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let relay = RelayConfig {
            base_url: normalize_base_url(&required("RELAY_URL")?),
            channel: required("RELAY_CHANNEL")?,
            send_token: required("RELAY_SEND_TOKEN")?,
            timeout: Duration::from_secs(parse_or(
                &lookup,
                "RELAY_TIMEOUT_SECS",
                DEFAULT_RELAY_TIMEOUT_SECS,
            )?),
        };

        let offset_minutes = parse_or(&lookup, "UTC_OFFSET_MINUTES", DEFAULT_UTC_OFFSET_MINUTES)?;
        let clock =
            LocalClock::from_offset_minutes(offset_minutes).ok_or_else(|| ConfigError::Invalid {
                name: "UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        Ok(Self {
            port: parse_or(&lookup, "PORT", DEFAULT_PORT)?,
            relay,
            clock,
        })
    }
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { name, value: raw }),
        None => Ok(default),
    }
}

/// Keeps an explicit http(s) scheme, otherwise assumes https
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    }
}
