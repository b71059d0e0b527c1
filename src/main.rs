//! # Latest Artifact Function
//!
//! HTTP function that answers with the newest APK in an Azure Blob Storage
//! container.
//!
//! ## Overview
//!
//! On every `GET /` the function:
//!
//! 1. **Lists the container** - one List Blobs call, anonymous or with a SAS token
//! 2. **Filters packages** - keeps objects whose name ends in `.apk`
//! 3. **Picks the newest** - maximum Last-Modified
//! 4. **Responds** - `200` with `{ fileName, downloadUrl, size, lastModified }`,
//!    `404` when no package exists, `500` when the listing fails
//!
//! ## Configuration
//!
//! `AZURE_ACCOUNT`, `AZURE_CONTAINER`, `AZURE_SAS_TOKEN` (optional),
//! `AZURE_BLOB_ENDPOINT` (optional), `ARTIFACT_EXTENSION`, `PORT`,
//! `STORAGE_TIMEOUT_SECS`, `RUST_LOG`.

use anyhow::Result;
use latest_artifact::function::start_server;
use latest_artifact::runtime::initialize;

#[tokio::main]
async fn main() -> Result<()> {
    let init = initialize()?;
    start_server(init.server_config.port, init.state).await
}
