//! Request middleware for the mock server
//!
//! - `logging_middleware` logs method, path, status and latency
//! - `sas_auth_middleware` rejects requests whose `sig` does not match the configured SAS
//! - `service_unavailable_middleware` answers 503 while the outage switch is on
//!
//! Health endpoints bypass the auth and outage checks.

use crate::errors::{blob_error_codes, blob_error_response};
use crate::AppState;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{info, warn};

fn is_health_path(path: &str) -> bool {
    path == "/" || path == "/health"
}

/// Extract the raw (still percent-encoded) `sig` parameter from a query string
fn signature_from_query(query: &str) -> Option<&str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == "sig")
        .map(|(_, value)| value)
}

/// Log every request without its query string, which may carry a SAS signature
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    info!(
        "{} {} -> {} ({}ms)",
        method,
        path,
        response.status().as_u16(),
        start.elapsed().as_millis()
    );
    response
}

/// Enforce a shared access signature when the state requires one
pub async fn sas_auth_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.required_signature() else {
        return next.run(request).await;
    };
    if is_health_path(request.uri().path()) {
        return next.run(request).await;
    }

    let provided = request.uri().query().and_then(signature_from_query);
    match provided {
        Some(sig) if sig == expected => next.run(request).await,
        Some(_) => {
            warn!("  Rejecting request with invalid SAS signature");
            blob_error_response(
                StatusCode::FORBIDDEN,
                blob_error_codes::AUTHENTICATION_FAILED,
                "Server failed to authenticate the request. Make sure the value of Authorization header is formed correctly including the signature.".to_string(),
            )
        }
        None => {
            warn!("  Rejecting anonymous request to a private container");
            blob_error_response(
                StatusCode::FORBIDDEN,
                blob_error_codes::AUTHENTICATION_FAILED,
                "Public access is not permitted on this storage account.".to_string(),
            )
        }
    }
}

/// Simulate a service outage
pub async fn service_unavailable_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if state.outage() && !is_health_path(request.uri().path()) {
        warn!("  Outage switch on, answering 503");
        return blob_error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            blob_error_codes::SERVER_BUSY,
            "The server is busy.".to_string(),
        );
    }
    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_from_query() {
        assert_eq!(
            signature_from_query("restype=container&comp=list&sv=2022-11-02&sig=abc%3D"),
            Some("abc%3D")
        );
        assert_eq!(signature_from_query("restype=container&comp=list"), None);
    }
}
