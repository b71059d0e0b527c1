//! Azure Blob Storage mock server
//!
//! A lightweight Axum server emulating the parts of the Blob service REST API
//! the latest-artifact resolver touches: Create Container, List Blobs, Put Blob
//! and Get Blob. Addressing is path style (`/{account}/{container}/{blob}`),
//! the same scheme Azurite uses, so the resolver reaches it through its
//! endpoint override.
//!
//! The server can require a SAS signature and can be switched into an outage
//! mode to exercise the resolver's failure paths.

pub mod errors;
pub mod handlers;
pub mod listing;
pub mod middleware;
pub mod store;

pub use middleware::{logging_middleware, sas_auth_middleware, service_unavailable_middleware};
pub use store::{BlobStore, StoredBlob};

use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use paths::{BLOB_ROUTE, CONTAINER_ROUTE};
use serde_json::json;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Account name Azurite uses for its well-known development account
pub const DEFAULT_ACCOUNT: &str = "devstoreaccount1";

/// Shared application state
#[derive(Clone, Debug)]
pub struct AppState {
    pub store: BlobStore,
    pub account: String,
    required_signature: Option<Arc<str>>,
    outage: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            store: BlobStore::new(),
            account: account.into(),
            required_signature: None,
            outage: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Require every storage request to carry `sig={signature}` in its query
    ///
    /// The signature is compared in its raw, percent-encoded form.
    #[must_use]
    pub fn with_required_signature(mut self, signature: impl Into<String>) -> Self {
        self.required_signature = Some(Arc::from(signature.into()));
        self
    }

    pub fn required_signature(&self) -> Option<&str> {
        self.required_signature.as_deref()
    }

    /// Toggle the simulated outage; all clones of the state observe it
    pub fn set_outage(&self, enabled: bool) {
        self.outage.store(enabled, Ordering::SeqCst);
    }

    pub fn outage(&self) -> bool {
        self.outage.load(Ordering::SeqCst)
    }
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok"
    }))
}

/// Build the mock server router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .route(
            CONTAINER_ROUTE,
            get(handlers::list_blobs).put(handlers::create_container),
        )
        .route(BLOB_ROUTE, get(handlers::get_blob).put(handlers::put_blob))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    service_unavailable_middleware,
                ))
                .layer(axum::middleware::from_fn_with_state(
                    state.clone(),
                    sas_auth_middleware,
                )),
        )
        .with_state(state)
}

/// Serve the mock on an already bound listener until the task is dropped
///
/// # Errors
///
/// Returns an error if the underlying server fails.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, router(state)).await
}
