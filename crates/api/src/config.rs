//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CAFECONNECT_DATABASE_URL` - `PostgreSQL` connection string. Falls back to
//!   `DATABASE_URL`, then `MONGODB_URI` (the name older deployments used). When
//!   none is set the server runs on the in-memory store.
//! - `CAFECONNECT_HOST` - Bind address (default: 0.0.0.0)
//! - `CAFECONNECT_PORT` or `PORT` - Listen port (default: 5000)
//! - `MAPS_API_KEY` - Map provider key handed to browser clients
//! - `CAFECONNECT_CART_IDLE_SECS` - Seconds before an untouched cart expires (default: 3600)
//! - `CAFECONNECT_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default cart idle expiry.
pub const DEFAULT_CART_IDLE: Duration = Duration::from_secs(3600);

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// API server configuration.
///
/// Implements `Debug` manually to redact the database URL.
#[derive(Clone)]
pub struct ApiConfig {
    /// `PostgreSQL` connection URL (contains password)
    pub database_url: Option<SecretString>,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Map provider key served to clients
    pub maps_api_key: Option<String>,
    /// How long an untouched cart is kept
    pub cart_idle: Duration,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .field("maps_api_key", &self.maps_api_key)
            .field("cart_idle", &self.cart_idle)
            .field("log_json", &self.log_json)
            .field("sentry_dsn", &self.sentry_dsn)
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            maps_api_key: None,
            cart_idle: DEFAULT_CART_IDLE,
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl ApiConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = ["CAFECONNECT_DATABASE_URL", "DATABASE_URL", "MONGODB_URI"]
            .into_iter()
            .find_map(get)
            .map(SecretString::from);

        let host = match get("CAFECONNECT_HOST") {
            Some(v) => parse_var("CAFECONNECT_HOST", &v)?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };

        let port = match ["CAFECONNECT_PORT", "PORT"]
            .into_iter()
            .find_map(|key| get(key).map(|v| (key, v)))
        {
            Some((key, v)) => parse_var(key, &v)?,
            None => DEFAULT_PORT,
        };

        let cart_idle = match get("CAFECONNECT_CART_IDLE_SECS") {
            Some(v) => Duration::from_secs(parse_var("CAFECONNECT_CART_IDLE_SECS", &v)?),
            None => DEFAULT_CART_IDLE,
        };

        let log_json = get("CAFECONNECT_LOG_JSON")
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true"));

        Ok(Self {
            database_url,
            host,
            port,
            maps_api_key: get("MAPS_API_KEY"),
            cart_idle,
            log_json,
            sentry_dsn: get("SENTRY_DSN"),
            sentry_environment: get("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert!(config.database_url.is_none());
        assert_eq!(config.port, 5000);
        assert_eq!(config.cart_idle, DEFAULT_CART_IDLE);
        assert!(!config.log_json);
    }

    #[test]
    fn test_database_url_fallback_order() {
        let config = load(&[
            ("MONGODB_URI", "postgres://legacy/db"),
            ("DATABASE_URL", "postgres://generic/db"),
        ])
        .unwrap();
        assert_eq!(
            config.database_url.unwrap().expose_secret(),
            "postgres://generic/db"
        );
    }

    #[test]
    fn test_port_prefers_specific_variable() {
        let config = load(&[("PORT", "8080"), ("CAFECONNECT_PORT", "9090")]).unwrap();
        assert_eq!(config.port, 9090);

        let config = load(&[("PORT", "8080")]).unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_port() {
        let err = load(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "PORT"));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = load(&[("MAPS_API_KEY", "  "), ("CAFECONNECT_LOG_JSON", "true")]).unwrap();
        assert!(config.maps_api_key.is_none());
        assert!(config.log_json);
    }

    #[test]
    fn test_socket_addr() {
        let config = load(&[("CAFECONNECT_HOST", "127.0.0.1"), ("PORT", "5001")]).unwrap();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 5001);
    }

    #[test]
    fn test_debug_redacts_database_url() {
        let config = load(&[("DATABASE_URL", "postgres://user:hunter2@db/cafes")]).unwrap();
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("hunter2"));
    }
}
