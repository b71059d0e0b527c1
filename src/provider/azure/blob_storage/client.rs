//! # Azure Blob Storage HTTP Client Creation

use super::error::BlobStorageError;
use crate::constants::USER_AGENT;
use reqwest::Client;
use std::time::Duration;

/// Create the HTTP client used for Blob service calls (rustls, bounded timeout)
pub fn create_http_client(timeout: Duration) -> Result<Client, BlobStorageError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(BlobStorageError::Client)
}
