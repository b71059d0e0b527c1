//! # Azure Blob Storage Client
//!
//! Lists containers through the Blob service REST API.
//!
//! Authentication is either anonymous (containers with public read access) or
//! a shared access signature appended to the request query string. The SAS is
//! treated as an opaque credential: it is never parsed, logged or embedded in
//! returned download URLs.

mod client;
mod error;
pub mod types;

pub use error::BlobStorageError;

use crate::config::StorageConfig;
use crate::provider::ObjectStoreProvider;
use crate::resolver::ObjectRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::{Duration, Instant};
use tracing::{debug, field, info, info_span, warn, Instrument};
use types::{EnumerationResults, StorageErrorBody};
use zeroize::Zeroizing;

/// Azure Blob Storage account client
pub struct AzureBlobStorage {
    http_client: Client,
    base_url: String,
    sas_token: Option<Zeroizing<String>>,
}

impl std::fmt::Debug for AzureBlobStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AzureBlobStorage")
            .field("base_url", &self.base_url)
            .field("authenticated", &self.sas_token.is_some())
            .finish_non_exhaustive()
    }
}

impl AzureBlobStorage {
    /// Create a client for the account described by `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &StorageConfig, timeout: Duration) -> Result<Self, BlobStorageError> {
        let base_url = config.base_url();
        if config.is_authenticated() {
            info!("Using SAS token authentication for {}", base_url);
        } else {
            info!("No SAS token configured, using anonymous access for {}", base_url);
        }

        Ok(Self {
            http_client: client::create_http_client(timeout)?,
            base_url,
            sas_token: config.sas_token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.sas_token.is_some()
    }

    /// Handle for one container of this account
    pub fn container(&self, name: &str) -> ContainerClient<'_> {
        ContainerClient {
            storage: self,
            name: name.to_string(),
        }
    }
}

/// Container-scoped operations
#[derive(Debug)]
pub struct ContainerClient<'a> {
    storage: &'a AzureBlobStorage,
    name: String,
}

impl ContainerClient<'_> {
    /// Unsigned URL of a blob in this container
    pub fn blob_url(&self, blob: &str) -> String {
        paths::blob_url(&self.storage.base_url, &self.name, blob)
    }

    /// List every blob in the container with a single List Blobs call
    ///
    /// Continuation pages are not requested; a truncated listing is logged.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, a non-success status, or an
    /// undecodable body.
    pub async fn list_blobs(&self) -> Result<Vec<ObjectRecord>, BlobStorageError> {
        let span = info_span!(
            "azure.blob.container.list",
            container.name = %self.name,
            blob.count = field::Empty,
            http.status = field::Empty,
            operation.success = field::Empty,
            operation.duration_ms = field::Empty,
        );
        let span_clone = span.clone();
        let start = Instant::now();

        async move {
            let result = self.list_blobs_once(&span_clone).await;
            span_clone.record("operation.duration_ms", start.elapsed().as_millis() as u64);
            match &result {
                Ok(records) => {
                    span_clone.record("operation.success", true);
                    span_clone.record("blob.count", records.len());
                    debug!("Listed {} blobs in {}", records.len(), self.name);
                }
                Err(e) => {
                    span_clone.record("operation.success", false);
                    warn!("Failed to list blobs in {}: {}", self.name, e);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn list_blobs_once(
        &self,
        span: &tracing::Span,
    ) -> Result<Vec<ObjectRecord>, BlobStorageError> {
        let url = paths::list_blobs_url(
            &self.storage.base_url,
            &self.name,
            self.storage.sas_token.as_deref().map(String::as_str),
        );

        let response = self
            .storage
            .http_client
            .get(&url)
            .header("x-ms-version", paths::API_VERSION)
            .send()
            .await
            .map_err(BlobStorageError::request)?;

        let status = response.status();
        span.record("http.status", status.as_u16());
        let header_code = response
            .headers()
            .get("x-ms-error-code")
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string);
        let body = response.text().await.map_err(BlobStorageError::request)?;

        if !status.is_success() {
            let error_body = StorageErrorBody::parse(&body);
            let message = error_body
                .summary()
                .map(ToString::to_string)
                .or_else(|| status.canonical_reason().map(ToString::to_string))
                .unwrap_or_default();
            let code = error_body
                .code
                .or(header_code)
                .unwrap_or_else(|| "Unknown".to_string());
            return Err(BlobStorageError::Service {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let results = EnumerationResults::parse(&body)?;
        if let Some(marker) = results.next_marker() {
            warn!(
                "Listing of {} was truncated (next marker {}); only the first page is considered",
                self.name, marker
            );
        }
        results.into_records()
    }
}

#[async_trait]
impl ObjectStoreProvider for AzureBlobStorage {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn list_objects(&self, container: &str) -> Result<Vec<ObjectRecord>> {
        let records = self
            .container(container)
            .list_blobs()
            .await
            .with_context(|| format!("Failed to list blobs in container {container}"))?;
        Ok(records)
    }
}
