//! # Latest Artifact Handler
//!
//! One invocation: list the container once, resolve, report.

use super::{FunctionResponse, ResolveError};
use crate::config::StorageConfig;
use crate::observability::metrics;
use crate::provider::ObjectStoreProvider;
use crate::resolver::{resolve_latest, ArtifactDescriptor};
use std::time::Instant;
use tracing::{error, info};

/// List `config.container` once and resolve the latest artifact in it
///
/// # Errors
///
/// [`ResolveError::Transport`] when the listing fails, [`ResolveError::NotFound`]
/// when nothing matches the extension.
pub async fn get_latest_artifact(
    store: &dyn ObjectStoreProvider,
    config: &StorageConfig,
) -> Result<ArtifactDescriptor, ResolveError> {
    info!(
        "Querying Azure Blob Storage: {}/{}",
        config.account, config.container
    );

    let start = Instant::now();
    let listing = store.list_objects(&config.container).await;
    metrics::observe_listing_duration(start.elapsed().as_secs_f64());

    let listing = listing.map_err(|e| {
        error!("Error fetching latest APK: {:#}", e);
        ResolveError::Transport(format!("{e:#}"))
    })?;
    metrics::set_listed_objects(listing.len());

    match resolve_latest(
        &listing,
        &config.extension,
        store.base_url(),
        &config.container,
    ) {
        Ok(descriptor) => {
            info!("Latest APK found: {}", descriptor.file_name);
            Ok(descriptor)
        }
        Err(e) => {
            info!("No APK files found ({} objects listed)", listing.len());
            Err(e.into())
        }
    }
}

/// Run one invocation and map it to the HTTP contract
pub async fn invoke(store: &dyn ObjectStoreProvider, config: &StorageConfig) -> FunctionResponse {
    let result = get_latest_artifact(store, config).await;
    metrics::increment_requests(match &result {
        Ok(_) => "found",
        Err(e) => e.outcome(),
    });
    FunctionResponse::from(result)
}
