//! # latest-apk
//!
//! One-shot command-line client for the latest artifact function.
//!
//! Performs the same single listing as the HTTP function and prints the same
//! JSON envelope to stdout. Logs go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! # Public container, defaults from the environment
//! latest-apk
//!
//! # SAS-protected container against a local emulator
//! latest-apk --endpoint http://127.0.0.1:10000/devstoreaccount1 \
//!     --container birdid-apk --sas-token "sv=2022-11-02&sig=..."
//! ```
//!
//! Exit codes: `0` artifact found, `2` no artifact, `1` listing or
//! configuration failure.

use anyhow::{Context, Result};
use clap::Parser;
use latest_artifact::config::{ServerConfig, StorageConfig};
use latest_artifact::function::invoke;
use latest_artifact::provider::azure::AzureBlobStorage;
use latest_artifact::runtime::{install_crypto_provider, load_dotenv};
use std::process::ExitCode;
use std::time::Duration;

/// Print the newest APK in an Azure Blob Storage container
#[derive(Parser)]
#[command(name = "latest-apk", version)]
#[command(about = "Resolve the most recently uploaded APK in Azure Blob Storage", long_about = None)]
struct Cli {
    /// Storage account name
    #[arg(long, env = "AZURE_ACCOUNT")]
    account: Option<String>,

    /// Container holding the packages
    #[arg(long, env = "AZURE_CONTAINER")]
    container: Option<String>,

    /// Shared access signature query string (anonymous access when unset)
    #[arg(long, env = "AZURE_SAS_TOKEN", hide_env_values = true)]
    sas_token: Option<String>,

    /// Account base URL override, e.g. an emulator
    #[arg(long, env = "AZURE_BLOB_ENDPOINT")]
    endpoint: Option<String>,

    /// Package name suffix
    #[arg(long, env = "ARTIFACT_EXTENSION")]
    extension: Option<String>,

    /// Listing timeout in seconds (default 30; unparseable values use the default)
    #[arg(long, env = "STORAGE_TIMEOUT_SECS")]
    timeout: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

impl Cli {
    /// Flags (or their environment fallbacks) with the function's defaults
    fn storage_config(&self) -> StorageConfig {
        StorageConfig::from_lookup(|key| match key {
            "AZURE_ACCOUNT" => self.account.clone(),
            "AZURE_CONTAINER" => self.container.clone(),
            "AZURE_SAS_TOKEN" => self.sas_token.clone(),
            "AZURE_BLOB_ENDPOINT" => self.endpoint.clone(),
            "ARTIFACT_EXTENSION" => self.extension.clone(),
            _ => None,
        })
    }

    /// Listing timeout, resolved the same way the HTTP function resolves it
    fn storage_timeout(&self) -> Duration {
        let server = ServerConfig::from_lookup(|key| match key {
            "STORAGE_TIMEOUT_SECS" => self.timeout.clone(),
            _ => None,
        });
        Duration::from_secs(server.storage_timeout_secs)
    }
}

/// Process exit status for an HTTP status: 0 found, 2 not found, 1 otherwise
fn exit_status(status: u16) -> u8 {
    match status {
        200 => 0,
        404 => 2,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // .env must be loaded before clap reads the environment fallbacks
    load_dotenv()?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "latest_artifact=warn".into()),
        )
        .init();
    install_crypto_provider();

    let cli = Cli::parse();
    let config = cli.storage_config();
    config
        .validate()
        .context("Invalid storage configuration")?;

    let store = AzureBlobStorage::new(&config, cli.storage_timeout())
        .context("Failed to create Azure Blob Storage client")?;

    let response = invoke(&store, &config).await;
    let output = if cli.pretty {
        serde_json::to_string_pretty(&response.body)?
    } else {
        serde_json::to_string(&response.body)?
    };
    println!("{output}");

    Ok(ExitCode::from(exit_status(response.status.as_u16())))
}
