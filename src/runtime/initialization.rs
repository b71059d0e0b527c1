//! # Initialization
//!
//! Function startup: `.env` loading, rustls setup, tracing, metrics,
//! configuration validation and storage client creation.

use crate::config::{self, ServerConfig};
use crate::constants::DEFAULT_LOG_FILTER;
use crate::function::FunctionState;
use crate::observability::metrics;
use crate::provider::azure::AzureBlobStorage;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Everything the server needs once startup succeeded
#[derive(Debug)]
pub struct InitializationResult {
    pub server_config: ServerConfig,
    pub state: FunctionState,
}

/// Load `.env` from the working directory if there is one
///
/// Returns the loaded path. A missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be parsed.
pub fn load_dotenv() -> Result<Option<std::path::PathBuf>> {
    match dotenvy::dotenv() {
        Ok(path) => Ok(Some(path)),
        Err(e) if e.not_found() => Ok(None),
        Err(e) => Err(e).context("Failed to load .env file"),
    }
}

/// Install the ring crypto provider for rustls
///
/// Required for rustls 0.23+ when no default provider is set via features.
pub fn install_crypto_provider() {
    if rustls::crypto::ring::default_provider()
        .install_default()
        .is_err()
    {
        debug!("rustls crypto provider already installed");
    }
}

/// Set up the fmt subscriber, honouring `RUST_LOG`
pub fn init_tracing() {
    // try_init: a subscriber may already be set (tests, embedding)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .try_init();
}

/// Initialize the function runtime
///
/// # Errors
///
/// Returns an error if `.env` is malformed, the configuration is invalid,
/// metrics cannot be registered, or the HTTP client cannot be built.
pub fn initialize() -> Result<InitializationResult> {
    let dotenv_path = load_dotenv()?;
    install_crypto_provider();
    init_tracing();

    info!(
        "Starting latest artifact function v{}",
        env!("CARGO_PKG_VERSION")
    );
    if let Some(path) = dotenv_path {
        info!("Loaded environment from {}", path.display());
    }

    metrics::register_metrics()?;

    let (storage_config, server_config) = config::load_config();
    storage_config
        .validate()
        .context("Invalid storage configuration")?;
    info!(
        "Storage: account={}, container={}, extension={}, endpoint={}",
        storage_config.account,
        storage_config.container,
        storage_config.extension,
        storage_config.base_url()
    );

    let store = AzureBlobStorage::new(
        &storage_config,
        Duration::from_secs(server_config.storage_timeout_secs),
    )
    .context("Failed to create Azure Blob Storage client")?;

    Ok(InitializationResult {
        server_config,
        state: FunctionState::new(Arc::new(store), storage_config),
    })
}
