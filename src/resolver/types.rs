//! # Resolver Types
//!
//! Object listings coming from the store and the descriptor handed back to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One object reported by a container listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRecord {
    pub name: String,
    pub last_modified: DateTime<Utc>,
    /// Size in bytes
    pub size: u64,
}

impl ObjectRecord {
    pub fn new(name: impl Into<String>, last_modified: DateTime<Utc>, size: u64) -> Self {
        Self {
            name: name.into(),
            last_modified,
            size,
        }
    }
}

/// The latest artifact and where to download it
///
/// Serialized in camelCase, `lastModified` as ISO-8601 with millisecond precision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactDescriptor {
    pub file_name: String,
    pub download_url: String,
    pub size: u64,
    pub last_modified: String,
}
