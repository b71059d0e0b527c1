//! # Azure Blob Storage Errors

use thiserror::Error;

/// Failure talking to the Blob service
#[derive(Debug, Error)]
pub enum BlobStorageError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// Network-level failure; the URL is stripped so the SAS never leaks
    #[error("request to the blob service failed")]
    Request(#[source] reqwest::Error),

    #[error("blob service returned HTTP {status} ({code}): {message}")]
    Service {
        status: u16,
        code: String,
        message: String,
    },

    #[error("failed to decode blob listing")]
    Decode(#[from] quick_xml::DeError),

    #[error("invalid Last-Modified value {value:?} for blob {name}")]
    InvalidTimestamp {
        name: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}

impl BlobStorageError {
    pub(crate) fn request(err: reqwest::Error) -> Self {
        Self::Request(err.without_url())
    }

    /// HTTP status reported by the service, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Service { status, .. } => Some(*status),
            Self::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
