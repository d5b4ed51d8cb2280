//! Runtime configuration for the task board server.
//!
//! Configuration is read from environment variables:
//! - `HOST` - Optional. Listen address. Defaults to `0.0.0.0`.
//! - `PORT` - Optional. Listen port. Defaults to `5000`.
//! - `DATABASE_URL` - Optional. `PostgreSQL` connection URL. When unset the
//!   server keeps its data in memory.
//! - `DATABASE_POOL_SIZE` - Optional. Maximum pooled connections. Defaults to `10`.
//! - `LOG_FORMAT` - Optional. `text` or `json`. Defaults to `text`.

use thiserror::Error;

/// Default listen address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Default maximum number of pooled database connections.
pub const DEFAULT_POOL_SIZE: u32 = 10;

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be used.
    #[error("invalid value for {name}: {reason}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Where task data is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// Process-local storage; lost on restart.
    InMemory,
    /// `PostgreSQL` through a connection pool.
    Postgres {
        /// Connection URL.
        url: String,
        /// Maximum pooled connections.
        pool_size: u32,
    },
}

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Listen address.
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Storage backend.
    pub store: StoreConfig,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through `lookup`, which maps a variable name to
    /// its value.
    ///
    /// Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = read("PORT")
            .map(|value| parse_port(&value))
            .transpose()?
            .unwrap_or(DEFAULT_PORT);
        let pool_size = read("DATABASE_POOL_SIZE")
            .map(|value| parse_pool_size(&value))
            .transpose()?
            .unwrap_or(DEFAULT_POOL_SIZE);
        let store = read("DATABASE_URL").map_or(StoreConfig::InMemory, |url| {
            StoreConfig::Postgres { url, pool_size }
        });
        let log_format = read("LOG_FORMAT")
            .map(|value| parse_log_format(&value))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            store,
            log_format,
        })
    }

    /// Returns the `host:port` listen address.
    #[must_use]
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_port(value: &str) -> Result<u16, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue {
            name: "PORT",
            reason: err.to_string(),
        })
}

fn parse_pool_size(value: &str) -> Result<u32, ConfigError> {
    let size: u32 = value
        .trim()
        .parse()
        .map_err(|err: std::num::ParseIntError| ConfigError::InvalidValue {
            name: "DATABASE_POOL_SIZE",
            reason: err.to_string(),
        })?;
    if size == 0 {
        return Err(ConfigError::InvalidValue {
            name: "DATABASE_POOL_SIZE",
            reason: "must be at least 1".to_owned(),
        });
    }
    Ok(size)
}

fn parse_log_format(value: &str) -> Result<LogFormat, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "text" => Ok(LogFormat::Text),
        "json" => Ok(LogFormat::Json),
        other => Err(ConfigError::InvalidValue {
            name: "LOG_FORMAT",
            reason: format!("expected text or json, got {other}"),
        }),
    }
}
