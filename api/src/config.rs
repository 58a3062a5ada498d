//! Server configuration module
//! Loaded from environment variables (a `.env` file is read first by `main`).

use std::env;
use std::net::{IpAddr, SocketAddr};
use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_STORE_CAPACITY: u64 = 10_000;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key}: {value} ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Where registrations are kept
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorePolicy {
    /// Unbounded in-process map
    Memory,
    /// Capacity-bounded cache, oldest/least used entries evicted
    Bounded,
}

impl std::str::FromStr for StorePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" => Ok(StorePolicy::Memory),
            "bounded" => Ok(StorePolicy::Bounded),
            _ => Err(format!("Unknown store policy: {}", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" | "text" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct StoreConfig {
    pub policy: StorePolicy,
    pub capacity: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            policy: StorePolicy::Memory,
            capacity: DEFAULT_STORE_CAPACITY,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ApiConfig {
    pub host: IpAddr,
    pub port: u16,
    /// Externally reachable base URL (tunnel or deployment), reported by
    /// the status endpoints so the wallet callback URL can be checked.
    pub public_base_url: String,
    pub store: StoreConfig,
    pub log_format: LogFormat,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([0, 0, 0, 0]),
            port: DEFAULT_PORT,
            public_base_url: format!("http://localhost:{}", DEFAULT_PORT),
            store: StoreConfig::default(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("API_HOST") {
            config.host = parse_var("API_HOST", &host)?;
        }

        if let Some(port) = lookup("API_PORT") {
            config.port = parse_var("API_PORT", &port)?;
        }

        config.public_base_url = match lookup("PUBLIC_BASE_URL") {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://localhost:{}", config.port),
        };

        if let Some(policy) = lookup("REGISTRATION_STORE") {
            config.store.policy = parse_var("REGISTRATION_STORE", &policy)?;
        }

        if let Some(capacity) = lookup("REGISTRATION_STORE_CAPACITY") {
            config.store.capacity = parse_var("REGISTRATION_STORE_CAPACITY", &capacity)?;
        }

        if let Some(format) = lookup("LOG_FORMAT") {
            config.log_format = parse_var("LOG_FORMAT", &format)?;
        }

        if config.store.policy == StorePolicy::Bounded && config.store.capacity == 0 {
            return Err(ConfigError::InvalidConfig(
                "REGISTRATION_STORE_CAPACITY must be greater than 0 for a bounded store".to_string(),
            ));
        }

        Ok(config)
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Public URL of an endpoint path, e.g. `/api/data-validation`.
    pub fn public_url(&self, path: &str) -> String {
        format!("{}{}", self.public_base_url, path)
    }
}

fn parse_var<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse::<T>().map_err(|e| ConfigError::InvalidValue {
        key,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.bind_addr().to_string(), "0.0.0.0:3001");
        assert_eq!(config.public_base_url, "http://localhost:3001");
        assert_eq!(config.store.policy, StorePolicy::Memory);
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("API_HOST", "127.0.0.1"),
            ("API_PORT", "8080"),
            ("PUBLIC_BASE_URL", "https://tickets.ngrok.app/"),
            ("REGISTRATION_STORE", "Bounded"),
            ("REGISTRATION_STORE_CAPACITY", "500"),
            ("LOG_FORMAT", "json"),
        ])
        .unwrap();

        assert_eq!(config.bind_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(
            config.public_url("/api/data-validation"),
            "https://tickets.ngrok.app/api/data-validation"
        );
        assert_eq!(config.store, StoreConfig { policy: StorePolicy::Bounded, capacity: 500 });
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("API_PORT", "http")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "API_PORT", .. }));
    }

    #[test]
    fn test_unknown_store_policy() {
        let err = load(&[("REGISTRATION_STORE", "postgres")]).unwrap_err();
        assert!(err.to_string().contains("Unknown store policy"));
    }

    #[test]
    fn test_bounded_store_needs_capacity() {
        let err = load(&[("REGISTRATION_STORE", "bounded"), ("REGISTRATION_STORE_CAPACITY", "0")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidConfig(_)));
    }
}
