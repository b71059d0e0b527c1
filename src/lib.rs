//! Latest Artifact Resolver Library
//!
//! Resolves the most recently uploaded APK in an Azure Blob Storage container
//! and describes where to download it.
//!
//! - [`resolver`] is the pure core: filter a listing by extension, pick the
//!   newest object, compose the download URL.
//! - [`provider`] lists containers (Azure Blob Storage REST API).
//! - [`function`] is the boundary: one listing per invocation, mapped onto the
//!   `{ success, data | error }` HTTP contract.

pub mod config;
pub mod constants;
pub mod function;
pub mod observability;
pub mod provider;
pub mod resolver;
pub mod runtime;

// Re-export core types for convenience
pub use resolver::{resolve_latest, ArtifactDescriptor, NotFoundError, ObjectRecord};
