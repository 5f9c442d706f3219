//! API server configuration.
//!
//! Configuration is loaded from environment variables with fallback to
//! defaults:
//!
//! | Variable             | Default   | Meaning                              |
//! |----------------------|-----------|--------------------------------------|
//! | `PORT`               | `8080`    | TCP port to listen on                |
//! | `BIND_ADDR`          | `0.0.0.0` | Interface to bind                    |
//! | `NTH_ORDER_DISCOUNT` | `3`       | Orders between discount codes        |

use std::env;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Interval used when `NTH_ORDER_DISCOUNT` is unset.
const DEFAULT_NTH_ORDER: i64 = 3;

/// API server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,

    /// Interface to bind (default: 0.0.0.0).
    pub bind_addr: String,

    /// "Every Nth order" discount interval handed to the store.
    pub nth_order_discount: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Ok(ServerConfig {
            port: parse_port(env::var("PORT").ok())?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0".to_string()),
            nth_order_discount: parse_nth_order(env::var("NTH_ORDER_DISCOUNT").ok())?,
        })
    }

    /// Returns the full bind address.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

/// Parses `PORT`, defaulting to 8080.
fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(8080),
        Some(v) => v
            .parse()
            .map_err(|_| ConfigError::InvalidValue("PORT".to_string())),
    }
}

/// Parses `NTH_ORDER_DISCOUNT`, defaulting to 3.
///
/// A non-positive value is ignored with a warning; the store would fall
/// back to its own default otherwise, silently changing the interval.
fn parse_nth_order(raw: Option<String>) -> Result<i64, ConfigError> {
    match raw {
        None => Ok(DEFAULT_NTH_ORDER),
        Some(v) => {
            let parsed: i64 = v
                .parse()
                .map_err(|_| ConfigError::InvalidValue("NTH_ORDER_DISCOUNT".to_string()))?;
            if parsed <= 0 {
                warn!(
                    value = parsed,
                    "NTH_ORDER_DISCOUNT must be positive, using default"
                );
                return Ok(DEFAULT_NTH_ORDER);
            }
            Ok(parsed)
        }
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),
}
