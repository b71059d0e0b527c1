//! # Configuration Errors

use thiserror::Error;

/// Invalid startup configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid storage account name {0:?}: expected 3-24 lowercase letters or digits")]
    InvalidAccount(String),

    #[error("invalid container name {0:?}: expected 3-63 lowercase letters, digits or single hyphens")]
    InvalidContainer(String),

    #[error("invalid blob endpoint {0:?}: expected an http:// or https:// URL")]
    InvalidEndpoint(String),

    #[error("artifact extension must not be empty")]
    EmptyExtension,
}
