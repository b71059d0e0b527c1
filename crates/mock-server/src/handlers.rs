//! Azure Blob Storage REST handlers
//!
//! Path-style addressing, as used by Azurite: `/{account}/{container}[/{blob}]`.

use crate::errors::{blob_error_codes, blob_error_response};
use crate::listing::{etag_for, format_http_date, render_enumeration_results};
use crate::AppState;
use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::{info, warn};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Query parameters understood by the container endpoints
///
/// SAS parameters (`sv`, `sig`, ...) are accepted and ignored here.
#[derive(Debug, Default, Deserialize)]
pub struct ContainerQuery {
    restype: Option<String>,
    comp: Option<String>,
    prefix: Option<String>,
}

fn unknown_account(account: &str) -> Response {
    blob_error_response(
        StatusCode::NOT_FOUND,
        blob_error_codes::RESOURCE_NOT_FOUND,
        format!("The specified account {account} does not exist."),
    )
}

fn container_not_found() -> Response {
    blob_error_response(
        StatusCode::NOT_FOUND,
        blob_error_codes::CONTAINER_NOT_FOUND,
        "The specified container does not exist.".to_string(),
    )
}

/// PUT container
/// Path: /{account}/{container}
/// Query: restype=container
pub async fn create_container(
    State(state): State<AppState>,
    Path((account, container)): Path<(String, String)>,
    Query(query): Query<ContainerQuery>,
) -> Response {
    info!("  PUT container: {}/{}", account, container);
    if account != state.account {
        return unknown_account(&account);
    }
    if query.restype.as_deref() != Some("container") {
        return blob_error_response(
            StatusCode::BAD_REQUEST,
            blob_error_codes::INVALID_QUERY_PARAMETER_VALUE,
            "Value for one of the query parameters specified in the request URI is invalid."
                .to_string(),
        );
    }

    if state.store.create_container(&container).await {
        StatusCode::CREATED.into_response()
    } else {
        blob_error_response(
            StatusCode::CONFLICT,
            blob_error_codes::CONTAINER_ALREADY_EXISTS,
            "The specified container already exists.".to_string(),
        )
    }
}

/// GET list of blobs
/// Path: /{account}/{container}
/// Query: restype=container&comp=list[&prefix=...]
pub async fn list_blobs(
    State(state): State<AppState>,
    Path((account, container)): Path<(String, String)>,
    Query(query): Query<ContainerQuery>,
) -> Response {
    info!("  GET blob list: {}/{}", account, container);
    if account != state.account {
        return unknown_account(&account);
    }
    if query.restype.as_deref() != Some("container") || query.comp.as_deref() != Some("list") {
        return blob_error_response(
            StatusCode::BAD_REQUEST,
            blob_error_codes::INVALID_QUERY_PARAMETER_VALUE,
            "Only the List Blobs operation is supported on this path.".to_string(),
        );
    }

    let Some(blobs) = state
        .store
        .list_blobs(&container, query.prefix.as_deref())
        .await
    else {
        warn!("  Container not found: {}", container);
        return container_not_found();
    };

    let service_endpoint = format!("/{account}/");
    let body = render_enumeration_results(
        &service_endpoint,
        &container,
        query.prefix.as_deref(),
        &blobs,
    );
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/xml")],
        body,
    )
        .into_response()
}

/// PUT blob (upload)
/// Path: /{account}/{container}/{blob}
pub async fn put_blob(
    State(state): State<AppState>,
    Path((account, container, blob)): Path<(String, String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    info!(
        "  PUT blob: {}/{}/{} ({} bytes)",
        account,
        container,
        blob,
        body.len()
    );
    if account != state.account {
        return unknown_account(&account);
    }

    let content_type = headers
        .get("x-ms-blob-content-type")
        .or_else(|| headers.get(header::CONTENT_TYPE))
        .and_then(|v| v.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();

    match state
        .store
        .put_blob(&container, &blob, body, &content_type)
        .await
    {
        Some(stored) => (
            StatusCode::CREATED,
            [
                (header::LAST_MODIFIED, format_http_date(&stored.last_modified)),
                (header::ETAG, etag_for(&stored)),
            ],
        )
            .into_response(),
        None => container_not_found(),
    }
}

/// GET blob (download)
/// Path: /{account}/{container}/{blob}
pub async fn get_blob(
    State(state): State<AppState>,
    Path((account, container, blob)): Path<(String, String, String)>,
) -> Response {
    info!("  GET blob: {}/{}/{}", account, container, blob);
    if account != state.account {
        return unknown_account(&account);
    }
    if !state.store.container_exists(&container).await {
        return container_not_found();
    }

    match state.store.get_blob(&container, &blob).await {
        Some(stored) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, stored.content_type.clone()),
                (header::LAST_MODIFIED, format_http_date(&stored.last_modified)),
                (header::ETAG, etag_for(&stored)),
            ],
            stored.data,
        )
            .into_response(),
        None => blob_error_response(
            StatusCode::NOT_FOUND,
            blob_error_codes::BLOB_NOT_FOUND,
            "The specified blob does not exist.".to_string(),
        ),
    }
}
