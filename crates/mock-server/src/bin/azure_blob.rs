//! Azure Blob Storage Mock Server
//!
//! Serves the in-memory Blob service emulation over HTTP.
//!
//! Environment Variables:
//! - PORT: Port to listen on (default: 10000, the Azurite blob port)
//! - MOCK_ACCOUNT: Storage account name (default: devstoreaccount1)
//! - MOCK_CONTAINERS: Comma-separated containers to create at startup
//! - MOCK_REQUIRED_SIG: When set, requests must carry this SAS `sig` value

use anyhow::{Context, Result};
use mock_server::{serve, AppState, DEFAULT_ACCOUNT};
use std::env;
use std::net::SocketAddr;
use tracing::{info, Level};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(false)
        .init();

    // Load configuration from environment
    let port = env::var("PORT")
        .unwrap_or_else(|_| "10000".to_string())
        .parse::<u16>()
        .context("PORT must be a valid u16")?;
    let account = env::var("MOCK_ACCOUNT").unwrap_or_else(|_| DEFAULT_ACCOUNT.to_string());

    info!("Starting Azure Blob Storage Mock Server...");
    info!("Account: {}", account);

    let mut state = AppState::new(account);
    if let Ok(signature) = env::var("MOCK_REQUIRED_SIG") {
        info!("SAS signature required for storage requests");
        state = state.with_required_signature(signature);
    }

    if let Ok(containers) = env::var("MOCK_CONTAINERS") {
        for container in containers.split(',').map(str::trim).filter(|c| !c.is_empty()) {
            state.store.create_container(container).await;
            info!("Created container: {}", container);
        }
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("✅ Azure Blob mock server ready at http://{}", addr);

    serve(listener, state).await.context("Mock server failed")?;
    Ok(())
}
