//! Function boundary tests
//!
//! Drive the HTTP router and the handler with an in-memory object store.

use anyhow::anyhow;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use latest_artifact::config::StorageConfig;
use latest_artifact::function::{
    get_latest_artifact, invoke, router, ApiResponse, FunctionState, ResolveError,
};
use latest_artifact::observability::metrics;
use latest_artifact::provider::ObjectStoreProvider;
use latest_artifact::ObjectRecord;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const BASE_URL: &str = "https://laow.blob.core.windows.net";

/// Store that returns a fixed listing (or failure) and counts calls
struct FakeStore {
    listing: std::result::Result<Vec<ObjectRecord>, String>,
    calls: AtomicUsize,
}

impl FakeStore {
    fn with(records: Vec<ObjectRecord>) -> Self {
        Self {
            listing: Ok(records),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(message: &str) -> Self {
        Self {
            listing: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl ObjectStoreProvider for FakeStore {
    fn base_url(&self) -> &str {
        BASE_URL
    }

    async fn list_objects(&self, _container: &str) -> anyhow::Result<Vec<ObjectRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.listing.clone().map_err(|message| anyhow!(message))
    }
}

fn record(name: &str, day: u32, hour: u32, size: u64) -> ObjectRecord {
    ObjectRecord::new(
        name,
        Utc.with_ymd_and_hms(2025, 1, day, hour, 0, 0).unwrap(),
        size,
    )
}

fn release_listing() -> Vec<ObjectRecord> {
    vec![
        record("app-v1.apk", 26, 9, 41_943_040),
        record("app-v2.apk", 27, 10, 52_428_800),
        record("readme.txt", 28, 8, 512),
    ]
}

fn server(store: FakeStore) -> TestServer {
    let state = FunctionState::new(Arc::new(store), StorageConfig::default());
    TestServer::new(router(state)).expect("test server")
}

#[tokio::test]
async fn test_latest_apk_is_returned() {
    let server = server(FakeStore::with(release_listing()));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: serde_json::Value = response.json();
    assert_eq!(body["success"], true);
    assert!(body.get("error").is_none());
    assert_eq!(body["data"]["fileName"], "app-v2.apk");
    assert_eq!(
        body["data"]["downloadUrl"],
        "https://laow.blob.core.windows.net/birdid-apk/app-v2.apk"
    );
    assert_eq!(body["data"]["size"], 52_428_800);
    assert_eq!(body["data"]["lastModified"], "2025-01-27T10:00:00.000Z");
}

#[tokio::test]
async fn test_latest_route_alias() {
    let server = server(FakeStore::with(release_listing()));
    let response = server.get("/latest").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: ApiResponse = response.json();
    assert_eq!(body.data.map(|d| d.file_name).as_deref(), Some("app-v2.apk"));
}

#[tokio::test]
async fn test_empty_container_is_not_found() {
    let server = server(FakeStore::with(Vec::new()));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!({
            "success": false,
            "error": "No APK files found in storage"
        })
    );
}

#[tokio::test]
async fn test_only_other_files_is_not_found() {
    let server = server(FakeStore::with(vec![
        record("readme.txt", 27, 10, 12),
        record("app.APK", 27, 11, 1024),
    ]));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_listing_failure_is_server_error() {
    let server = server(FakeStore::failing("connection refused"));

    let response = server.get("/").await;
    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.json::<serde_json::Value>(),
        serde_json::json!({
            "success": false,
            "error": "connection refused"
        })
    );
}

#[tokio::test]
async fn test_one_listing_per_invocation() {
    let store = FakeStore::with(release_listing());
    let config = StorageConfig::default();

    let response = invoke(&store, &config).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(store.calls.load(Ordering::SeqCst), 1);

    let _ = invoke(&store, &config).await;
    assert_eq!(store.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_custom_extension_and_container() {
    let store = FakeStore::with(vec![
        record("app-v3.apk", 27, 12, 10),
        record("bundle-v1.aab", 27, 9, 20),
    ]);
    let config = StorageConfig::from_lookup(|key| match key {
        "AZURE_CONTAINER" => Some("bundles".to_string()),
        "ARTIFACT_EXTENSION" => Some(".aab".to_string()),
        _ => None,
    });

    let descriptor = get_latest_artifact(&store, &config).await.unwrap();
    assert_eq!(descriptor.file_name, "bundle-v1.aab");
    assert_eq!(
        descriptor.download_url,
        "https://laow.blob.core.windows.net/bundles/bundle-v1.aab"
    );
}

#[tokio::test]
async fn test_transport_error_keeps_context_chain() {
    struct ContextStore;

    #[async_trait]
    impl ObjectStoreProvider for ContextStore {
        fn base_url(&self) -> &str {
            BASE_URL
        }

        async fn list_objects(&self, container: &str) -> anyhow::Result<Vec<ObjectRecord>> {
            Err(anyhow!("connection refused")
                .context(format!("Failed to list blobs in container {container}")))
        }
    }

    let err = get_latest_artifact(&ContextStore, &StorageConfig::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ResolveError::Transport(_)));
    assert_eq!(
        err.to_string(),
        "Failed to list blobs in container birdid-apk: connection refused"
    );
}

#[tokio::test]
async fn test_health_check() {
    let server = server(FakeStore::failing("unused"));
    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<serde_json::Value>()["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint() {
    metrics::register_metrics().unwrap();
    let server = server(FakeStore::with(release_listing()));

    let _ = server.get("/").await;
    let response = server.get("/metrics").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let text = response.text();
    assert!(text.contains("latest_artifact_requests_total{outcome=\"found\"}"));
    assert!(text.contains("latest_artifact_listing_duration_seconds"));
}
