//! Shared API path definitions for Azure Blob Storage
//!
//! This crate centralizes the REST paths and query strings used by the
//! resolver's storage client and by the mock server, so both sides agree on
//! the shape of every request.
//!
//! ## Route Constants
//!
//! Route constants are provided for Axum routes, which require static string literals.
//! These constants are validated against the URL builders in tests.

pub mod azure;

pub use azure::{
    account_url, blob_url, container_url, list_blobs_url, API_VERSION, BLOB_ROUTE,
    CONTAINER_ROUTE, LIST_BLOBS_QUERY,
};
