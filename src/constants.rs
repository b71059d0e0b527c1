//! # Constants
//!
//! Default values for configuration and the fixed parts of the HTTP contract.

/// Default storage account when `AZURE_ACCOUNT` is unset
pub const DEFAULT_AZURE_ACCOUNT: &str = "laow";

/// Default container when `AZURE_CONTAINER` is unset
pub const DEFAULT_AZURE_CONTAINER: &str = "birdid-apk";

/// Package suffix the resolver looks for
pub const DEFAULT_ARTIFACT_EXTENSION: &str = ".apk";

/// Default HTTP port for the function server
pub const DEFAULT_PORT: u16 = 3000;

/// Default timeout for the storage listing call (seconds)
pub const DEFAULT_STORAGE_TIMEOUT_SECS: u64 = 30;

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "latest_artifact=info,tower_http=info";

/// Error message returned with HTTP 404
pub const NOT_FOUND_MESSAGE: &str = "No APK files found in storage";

/// User agent sent to the storage service
pub const USER_AGENT: &str = concat!("latest-artifact-resolver/", env!("CARGO_PKG_VERSION"));
