//! # HTTP Server
//!
//! Hosts the function behind axum.
//!
//! | Route | Purpose |
//! |---|---|
//! | `GET /`, `GET /latest` | resolve the latest artifact |
//! | `GET /health` | liveness probe |
//! | `GET /metrics` | Prometheus metrics |

use super::{handler, FunctionResponse};
use crate::config::StorageConfig;
use crate::observability::metrics;
use crate::provider::ObjectStoreProvider;
use anyhow::{Context, Result};
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// State shared by all requests; immutable after startup
#[derive(Clone)]
pub struct FunctionState {
    pub store: Arc<dyn ObjectStoreProvider>,
    pub config: Arc<StorageConfig>,
}

impl std::fmt::Debug for FunctionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionState")
            .field("base_url", &self.store.base_url())
            .field("config", &self.config)
            .finish()
    }
}

impl FunctionState {
    pub fn new(store: Arc<dyn ObjectStoreProvider>, config: StorageConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

async fn latest_artifact(State(state): State<FunctionState>) -> FunctionResponse {
    handler::invoke(state.store.as_ref(), &state.config).await
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok"
    }))
}

async fn metrics_endpoint() -> Response {
    match metrics::render() {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!("Failed to encode metrics: {:#}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build the function router
///
/// CORS is permissive: the download page calling this function is served from
/// a different origin.
pub fn router(state: FunctionState) -> Router {
    Router::new()
        .route("/", get(latest_artifact))
        .route("/latest", get(latest_artifact))
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_endpoint))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

/// Serve the function until SIGINT/SIGTERM
///
/// # Errors
///
/// Returns an error if the port cannot be bound or the server fails.
pub async fn start_server(port: u16, state: FunctionState) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {addr}"))?;
    info!("Latest artifact function listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received Ctrl+C, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
