//! Server configuration from environment variables.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::store::RestConfig;

/// Default directory for the file-backed store.
const DEFAULT_DATA_DIR: &str = "data/sample";

/// Errors from reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("invalid value {value:?} for {var}: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// A variable required by another one is not set
    #[error("{var} must be set when {because} is set")]
    Missing {
        var: &'static str,
        because: &'static str,
    },
}

/// Where tickets are read from.
#[derive(Debug, Clone)]
pub enum StoreBackend {
    /// PostgREST-style HTTP endpoint
    Rest(RestConfig),
    /// JSON files in a directory, one per mode
    Files(PathBuf),
}

/// Configuration for the ticket server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on
    pub bind_addr: SocketAddr,
    /// Ticket store backend
    pub backend: StoreBackend,
}

impl ServerConfig {
    /// Read configuration from the process environment.
    ///
    /// - `TICKETS_BIND_ADDR`: listen address (default `127.0.0.1:3000`)
    /// - `TICKETS_REST_URL` / `TICKETS_REST_KEY`: REST backend, used when the URL is set
    /// - `TICKETS_MAX_CONCURRENT`, `TICKETS_TIMEOUT_SECS`: REST client limits
    /// - `TICKETS_DATA_DIR`: file backend directory (default `data/sample`)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_addr = parse_var("TICKETS_BIND_ADDR", var("TICKETS_BIND_ADDR"))?
            .unwrap_or_else(default_bind_addr);

        let backend = match var("TICKETS_REST_URL") {
            Some(url) => {
                let key = var("TICKETS_REST_KEY").ok_or(ConfigError::Missing {
                    var: "TICKETS_REST_KEY",
                    because: "TICKETS_REST_URL",
                })?;
                let mut rest = RestConfig::new(url, key);
                let max_concurrent =
                    parse_var("TICKETS_MAX_CONCURRENT", var("TICKETS_MAX_CONCURRENT"))?;
                if let Some(n) = max_concurrent {
                    rest = rest.with_max_concurrent(n);
                }
                let timeout = parse_var("TICKETS_TIMEOUT_SECS", var("TICKETS_TIMEOUT_SECS"))?;
                if let Some(secs) = timeout {
                    rest = rest.with_timeout(secs);
                }
                StoreBackend::Rest(rest)
            }
            None => StoreBackend::Files(
                var("TICKETS_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            ),
        };

        Ok(Self { bind_addr, backend })
    }

    /// Set the listen address.
    pub fn with_bind_addr(mut self, addr: SocketAddr) -> Self {
        self.bind_addr = addr;
        self
    }

    /// Set the store backend.
    pub fn with_backend(mut self, backend: StoreBackend) -> Self {
        self.backend = backend;
        self
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            backend: StoreBackend::Files(PathBuf::from(DEFAULT_DATA_DIR)),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

fn parse_var<T>(var: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .map(|v| {
            v.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                var,
                value: v.clone(),
                reason: e.to_string(),
            })
        })
        .transpose()
}
