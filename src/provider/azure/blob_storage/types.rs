//! # Azure Blob Storage Types
//!
//! Response documents of the Blob service REST API.
//!
//! List Blobs returns:
//!
//! ```xml
//! <EnumerationResults ServiceEndpoint="..." ContainerName="...">
//!   <Blobs>
//!     <Blob>
//!       <Name>app-v2.apk</Name>
//!       <Properties>
//!         <Last-Modified>Mon, 27 Jan 2025 10:00:00 GMT</Last-Modified>
//!         <Content-Length>52428800</Content-Length>
//!       </Properties>
//!     </Blob>
//!   </Blobs>
//!   <NextMarker />
//! </EnumerationResults>
//! ```
//!
//! API Reference: https://learn.microsoft.com/en-us/rest/api/storageservices/list-blobs

use super::error::BlobStorageError;
use crate::resolver::ObjectRecord;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Body of a List Blobs response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumerationResults {
    #[serde(rename = "@ContainerName", default)]
    pub container_name: Option<String>,
    #[serde(default)]
    pub blobs: Blobs,
    #[serde(default)]
    pub next_marker: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Blobs {
    #[serde(rename = "Blob", default)]
    pub items: Vec<BlobItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BlobItem {
    pub name: String,
    pub properties: BlobProperties,
}

#[derive(Debug, Deserialize)]
pub struct BlobProperties {
    /// RFC 1123 date, e.g. `Mon, 27 Jan 2025 10:00:00 GMT`
    #[serde(rename = "Last-Modified")]
    pub last_modified: String,
    #[serde(rename = "Content-Length", default)]
    pub content_length: u64,
}

/// Body of a Blob service error response
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StorageErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Azure prefixes some bodies with a UTF-8 byte order mark
fn strip_bom(body: &str) -> &str {
    body.trim_start_matches('\u{feff}')
}

impl EnumerationResults {
    pub fn parse(body: &str) -> Result<Self, BlobStorageError> {
        Ok(quick_xml::de::from_str(strip_bom(body))?)
    }

    /// Continuation marker, if the service truncated the listing
    pub fn next_marker(&self) -> Option<&str> {
        self.next_marker.as_deref().filter(|m| !m.is_empty())
    }

    pub fn into_records(self) -> Result<Vec<ObjectRecord>, BlobStorageError> {
        self.blobs
            .items
            .into_iter()
            .map(BlobItem::into_record)
            .collect()
    }
}

impl BlobItem {
    fn into_record(self) -> Result<ObjectRecord, BlobStorageError> {
        let last_modified = DateTime::parse_from_rfc2822(&self.properties.last_modified)
            .map_err(|source| BlobStorageError::InvalidTimestamp {
                name: self.name.clone(),
                value: self.properties.last_modified.clone(),
                source,
            })?
            .with_timezone(&Utc);

        Ok(ObjectRecord {
            name: self.name,
            last_modified,
            size: self.properties.content_length,
        })
    }
}

impl StorageErrorBody {
    /// Best-effort parse; non-XML bodies yield an empty error
    pub fn parse(body: &str) -> Self {
        quick_xml::de::from_str(strip_bom(body)).unwrap_or_default()
    }

    /// First line of the message; the rest carries request ids and timestamps
    pub fn summary(&self) -> Option<&str> {
        self.message
            .as_deref()
            .and_then(|m| m.lines().next())
            .map(str::trim)
            .filter(|m| !m.is_empty())
    }
}
