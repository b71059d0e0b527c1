//! # Azure Blob Storage Paths
//!
//! URL shapes for the Blob service REST API.
//!
//! Production accounts use virtual-host style URLs
//! (`https://{account}.blob.core.windows.net/{container}`), while emulators and
//! the mock server use path style (`http://host:port/{account}/{container}`).
//! Either way the account-level base URL is opaque to the builders below: they
//! only append the container, blob and query parts.

/// REST API version sent in the `x-ms-version` header
pub const API_VERSION: &str = "2021-08-06";

/// Query string selecting the List Blobs operation on a container
pub const LIST_BLOBS_QUERY: &str = "restype=container&comp=list";

/// Host suffix of public-cloud blob endpoints
pub const BLOB_HOST_SUFFIX: &str = "blob.core.windows.net";

/// Axum route for container-level requests on a path-style endpoint
pub const CONTAINER_ROUTE: &str = "/{account}/{container}";

/// Axum route for blob-level requests on a path-style endpoint
/// Blob names may contain `/`, hence the wildcard
pub const BLOB_ROUTE: &str = "/{account}/{container}/{*blob}";

/// Public-cloud base URL for a storage account
///
/// Format: `https://{account}.blob.core.windows.net`
pub fn account_url(account: &str) -> String {
    format!("https://{account}.{BLOB_HOST_SUFFIX}")
}

/// URL of a container below an account base URL
pub fn container_url(base_url: &str, container: &str) -> String {
    format!("{}/{container}", base_url.trim_end_matches('/'))
}

/// URL of a blob below an account base URL
///
/// The blob name is appended verbatim; object names are expected to be URL-safe.
pub fn blob_url(base_url: &str, container: &str, blob: &str) -> String {
    format!("{}/{blob}", container_url(base_url, container))
}

/// URL of the List Blobs call for a container
///
/// When a SAS token is given it is appended after the operation query.
/// A leading `?` on the token is tolerated, as the Azure portal copies it that way.
pub fn list_blobs_url(base_url: &str, container: &str, sas_token: Option<&str>) -> String {
    let mut url = format!("{}?{LIST_BLOBS_QUERY}", container_url(base_url, container));
    if let Some(token) = sas_token.map(|t| t.trim_start_matches('?')) {
        if !token.is_empty() {
            url.push('&');
            url.push_str(token);
        }
    }
    url
}
