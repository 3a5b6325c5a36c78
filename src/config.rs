//! Server configuration loaded from environment variables.

use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_BIND: &str = "0.0.0.0:3000";
const DEFAULT_QUEUE_CAPACITY: usize = 256;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP/WebSocket listener binds to
    pub bind: SocketAddr,
    pub hub: HubConfig,
}

/// Queue bounds for the broadcast hub
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubConfig {
    /// Commands waiting for the coordinator; publishes beyond this are dropped
    pub inbox_capacity: usize,
    /// Messages waiting for one subscriber; overflowing disconnects the subscriber
    pub subscriber_queue_capacity: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            inbox_capacity: DEFAULT_QUEUE_CAPACITY,
            subscriber_queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: String, value: String },
}

impl ServerConfig {
    /// Reads `SERVER_BIND`, `HUB_INBOX_CAPACITY` and `HUB_SUBSCRIBER_QUEUE_CAPACITY`,
    /// falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`ServerConfig::from_env`] but reads values through `lookup`
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind = match lookup("SERVER_BIND") {
            Some(value) => parse_value("SERVER_BIND", &value)?,
            None => parse_value("SERVER_BIND", DEFAULT_BIND)?,
        };

        let hub = HubConfig {
            inbox_capacity: parse_capacity(&lookup, "HUB_INBOX_CAPACITY")?,
            subscriber_queue_capacity: parse_capacity(&lookup, "HUB_SUBSCRIBER_QUEUE_CAPACITY")?,
        };

        Ok(Self { bind, hub })
    }
}

fn parse_value<T: FromStr>(var: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var: var.to_string(),
        value: value.to_string(),
    })
}

fn parse_capacity<F>(lookup: &F, var: &str) -> Result<usize, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let capacity = match lookup(var) {
        Some(value) => parse_value(var, &value)?,
        None => DEFAULT_QUEUE_CAPACITY,
    };

    // A zero-capacity channel would panic on creation
    if capacity == 0 {
        return Err(ConfigError::Invalid {
            var: var.to_string(),
            value: "0".to_string(),
        });
    }
    Ok(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.hub, HubConfig::default());
        assert_eq!(config.hub.inbox_capacity, 256);
    }

    #[test]
    fn values_are_read_from_the_environment() {
        let config = load(&[
            ("SERVER_BIND", "127.0.0.1:8080"),
            ("HUB_INBOX_CAPACITY", "32"),
            ("HUB_SUBSCRIBER_QUEUE_CAPACITY", " 8 "),
        ])
        .unwrap();

        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.hub.inbox_capacity, 32);
        assert_eq!(config.hub.subscriber_queue_capacity, 8);
    }

    #[test]
    fn unparsable_values_are_rejected() {
        let err = load(&[("HUB_INBOX_CAPACITY", "lots")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "HUB_INBOX_CAPACITY".into(),
                value: "lots".into()
            }
        );

        assert!(load(&[("SERVER_BIND", "not-an-address")]).is_err());
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = load(&[("HUB_SUBSCRIBER_QUEUE_CAPACITY", "0")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                var: "HUB_SUBSCRIBER_QUEUE_CAPACITY".into(),
                value: "0".into()
            }
        );
    }
}
