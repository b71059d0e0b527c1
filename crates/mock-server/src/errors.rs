//! Azure Blob Storage error response formatting
//!
//! The Blob service reports failures as an XML body plus an `x-ms-error-code` header:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <Error><Code>ContainerNotFound</Code><Message>...</Message></Error>
//! ```
//!
//! Reference: https://learn.microsoft.com/en-us/rest/api/storageservices/blob-service-error-codes

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use quick_xml::escape::escape;

/// Azure Blob Storage error code constants
pub mod blob_error_codes {
    pub const CONTAINER_NOT_FOUND: &str = "ContainerNotFound";
    pub const CONTAINER_ALREADY_EXISTS: &str = "ContainerAlreadyExists";
    pub const BLOB_NOT_FOUND: &str = "BlobNotFound";
    pub const RESOURCE_NOT_FOUND: &str = "ResourceNotFound";
    pub const AUTHENTICATION_FAILED: &str = "AuthenticationFailed";
    pub const INVALID_QUERY_PARAMETER_VALUE: &str = "InvalidQueryParameterValue";
    pub const SERVER_BUSY: &str = "ServerBusy";
}

/// Render the XML error body
pub fn render_error_body(code: &str, message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"utf-8\"?><Error><Code>{}</Code><Message>{}</Message></Error>",
        escape(code),
        escape(message)
    )
}

/// Azure Blob error response
pub fn blob_error_response(status: StatusCode, error_code: &str, message: String) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "application/xml".to_string()),
            (
                header::HeaderName::from_static("x-ms-error-code"),
                error_code.to_string(),
            ),
        ],
        render_error_body(error_code, &message),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_is_escaped() {
        let body = render_error_body("AuthenticationFailed", "sig <missing> & expired");
        assert!(body.contains("<Code>AuthenticationFailed</Code>"));
        assert!(body.contains("sig &lt;missing&gt; &amp; expired"));
    }
}
