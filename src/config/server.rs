//! # Server Configuration
//!
//! HTTP server settings loaded from environment variables.

use super::non_empty;

/// HTTP server configuration
///
/// All settings have sensible defaults and can be overridden via environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP port for the function endpoint, health probe and metrics
    pub port: u16,
    /// Timeout for the storage listing call (seconds)
    pub storage_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        use crate::constants::{DEFAULT_PORT, DEFAULT_STORAGE_TIMEOUT_SECS};
        Self {
            port: DEFAULT_PORT,
            storage_timeout_secs: DEFAULT_STORAGE_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        use crate::constants::{DEFAULT_PORT, DEFAULT_STORAGE_TIMEOUT_SECS};
        Self {
            port: var_or_default(&lookup, "PORT", DEFAULT_PORT),
            storage_timeout_secs: var_or_default(
                &lookup,
                "STORAGE_TIMEOUT_SECS",
                DEFAULT_STORAGE_TIMEOUT_SECS,
            ),
        }
    }
}

/// Read a variable or return the default when it is unset or does not parse
fn var_or_default<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    non_empty(lookup, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
