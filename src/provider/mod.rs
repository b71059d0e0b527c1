//! # Object Store Providers
//!
//! The upstream collaborator the resolver lists artifacts from.
//!
//! - `azure`: Azure Blob Storage over its REST API

pub mod azure;

use crate::resolver::ObjectRecord;
use anyhow::Result;
use async_trait::async_trait;

/// A remote object store that can enumerate a container
#[async_trait]
pub trait ObjectStoreProvider: Send + Sync {
    /// Base URL download links are composed from (`{base_url}/{container}/{name}`)
    fn base_url(&self) -> &str;

    /// List every object in `container` with one enumeration call
    ///
    /// The listing is fully materialized before it is returned.
    async fn list_objects(&self, container: &str) -> Result<Vec<ObjectRecord>>;
}
