//! # Function Configuration
//!
//! Configuration loaded from environment variables (as set by the function
//! runtime, or from a local `.env` file during development).
//!
//! Every setting has a default, so the function starts against the public
//! release container without any configuration. Empty variables count as unset.

mod error;
mod server;
mod storage;

pub use error::ConfigError;
pub use server::ServerConfig;
pub use storage::StorageConfig;

/// Load configuration from environment variables with defaults
pub fn load_config() -> (StorageConfig, ServerConfig) {
    (StorageConfig::from_env(), ServerConfig::from_env())
}

/// Read a variable through `lookup`, treating empty or blank values as unset
pub(crate) fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
