//! # Azure Providers
//!
//! - `blob_storage`: Azure Blob Storage (List Blobs over REST, anonymous or SAS)

pub mod blob_storage;

// Re-export for convenience
pub use blob_storage::{AzureBlobStorage, BlobStorageError, ContainerClient};
