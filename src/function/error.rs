//! # Function Errors

use crate::resolver::NotFoundError;
use axum::http::StatusCode;
use thiserror::Error;

/// Why an invocation did not produce an artifact
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No object carries the artifact extension (HTTP 404)
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The listing call failed (HTTP 500); holds the failure's full message
    #[error("{0}")]
    Transport(String),
}

impl ResolveError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Metric label for this outcome
    pub fn outcome(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::Transport(_) => "error",
        }
    }
}
