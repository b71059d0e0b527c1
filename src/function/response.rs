//! # Response Envelope
//!
//! Every outcome is reported as `{ success, data | error }`:
//!
//! - 200: `{ "success": true, "data": { fileName, downloadUrl, size, lastModified } }`
//! - 404: `{ "success": false, "error": "No APK files found in storage" }`
//! - 500: `{ "success": false, "error": "<failure message>" }`

use super::ResolveError;
use crate::constants::NOT_FOUND_MESSAGE;
use crate::resolver::ArtifactDescriptor;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};

/// JSON body returned to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ArtifactDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn found(descriptor: ArtifactDescriptor) -> Self {
        Self {
            success: true,
            data: Some(descriptor),
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Status code plus envelope, ready to be sent or printed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionResponse {
    pub status: StatusCode,
    pub body: ApiResponse,
}

impl From<Result<ArtifactDescriptor, ResolveError>> for FunctionResponse {
    fn from(result: Result<ArtifactDescriptor, ResolveError>) -> Self {
        match result {
            Ok(descriptor) => Self {
                status: StatusCode::OK,
                body: ApiResponse::found(descriptor),
            },
            Err(err) => {
                let message = match &err {
                    ResolveError::NotFound(_) => NOT_FOUND_MESSAGE.to_string(),
                    ResolveError::Transport(message) => message.clone(),
                };
                Self {
                    status: err.status_code(),
                    body: ApiResponse::failed(message),
                }
            }
        }
    }
}

impl IntoResponse for FunctionResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::NotFoundError;
    use serde_json::json;

    #[test]
    fn test_not_found_envelope() {
        let response = FunctionResponse::from(Err(ResolveError::NotFound(NotFoundError {
            extension: ".apk".to_string(),
        })));
        assert_eq!(response.status, StatusCode::NOT_FOUND);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({ "success": false, "error": "No APK files found in storage" })
        );
    }

    #[test]
    fn test_transport_envelope() {
        let response =
            FunctionResponse::from(Err(ResolveError::Transport("connection refused".into())));
        assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({ "success": false, "error": "connection refused" })
        );
    }

    #[test]
    fn test_found_envelope() {
        let descriptor = ArtifactDescriptor {
            file_name: "app.apk".to_string(),
            download_url: "https://laow.blob.core.windows.net/birdid-apk/app.apk".to_string(),
            size: 7,
            last_modified: "2025-01-27T10:00:00.000Z".to_string(),
        };
        let response = FunctionResponse::from(Ok(descriptor));
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({
                "success": true,
                "data": {
                    "fileName": "app.apk",
                    "downloadUrl": "https://laow.blob.core.windows.net/birdid-apk/app.apk",
                    "size": 7,
                    "lastModified": "2025-01-27T10:00:00.000Z"
                }
            })
        );
    }
}
