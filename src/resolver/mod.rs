//! # Latest-Artifact Resolver
//!
//! Picks the most recently modified package out of a container listing.
//!
//! Only names ending in the configured extension are considered (exact,
//! case-sensitive suffix). Among those the maximum `last_modified` wins; on
//! identical timestamps the lexicographically greatest name wins, so the result
//! never depends on listing order.

mod types;

pub use types::{ArtifactDescriptor, ObjectRecord};

use chrono::SecondsFormat;
use thiserror::Error;

/// No object in the listing carries the artifact extension
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("no objects ending in {extension:?} found")]
pub struct NotFoundError {
    pub extension: String,
}

/// Resolve the latest artifact in a materialized listing
///
/// The download URL is `{base_url}/{container_name}/{file_name}`, concatenated
/// verbatim.
///
/// # Errors
///
/// Returns [`NotFoundError`] when no record name ends with `extension`.
pub fn resolve_latest(
    listing: &[ObjectRecord],
    extension: &str,
    base_url: &str,
    container_name: &str,
) -> Result<ArtifactDescriptor, NotFoundError> {
    let latest = listing
        .iter()
        .filter(|record| record.name.ends_with(extension))
        .max_by(|a, b| {
            a.last_modified
                .cmp(&b.last_modified)
                .then_with(|| a.name.cmp(&b.name))
        })
        .ok_or_else(|| NotFoundError {
            extension: extension.to_string(),
        })?;

    Ok(ArtifactDescriptor {
        file_name: latest.name.clone(),
        download_url: format!("{base_url}/{container_name}/{}", latest.name),
        size: latest.size,
        last_modified: latest
            .last_modified
            .to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
