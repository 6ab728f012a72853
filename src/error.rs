//! Error types for the user service
//!
//! Every failure is one of three tags, each mapped to a fixed status code
//! at the HTTP boundary.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::models::{ErrorResponse, MessageResponse};

// == User Error Enum ==
/// Unified error type for the user service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    /// No user matches the requested email
    #[error("User not found")]
    NotFound,

    /// Missing/blank fields or a duplicate email
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Store or cache could not be reached or returned a transport error
    #[error("Backend unavailable: {0}")]
    Unavailable(String),
}

impl UserError {
    /// Shorthand for a validation failure.
    pub fn validation(msg: impl Into<String>) -> Self {
        UserError::ValidationFailed(msg.into())
    }

    /// Shorthand for a backend failure.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        UserError::Unavailable(msg.into())
    }

    /// Status code this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            UserError::NotFound => StatusCode::NOT_FOUND,
            UserError::ValidationFailed(_) => StatusCode::BAD_REQUEST,
            UserError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == Body Rejections ==
/// Malformed or mistyped JSON bodies are validation failures.
impl From<JsonRejection> for UserError {
    fn from(rejection: JsonRejection) -> Self {
        UserError::ValidationFailed(rejection.body_text())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            UserError::NotFound => {
                (status, Json(MessageResponse::user_not_found())).into_response()
            }
            UserError::ValidationFailed(msg) => {
                (status, Json(ErrorResponse::new(msg))).into_response()
            }
            UserError::Unavailable(msg) => {
                // The cause stays in the log; callers only see the generic body.
                error!("Request failed: {}", msg);
                (status, Json(ErrorResponse::server_error())).into_response()
            }
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the user service.
pub type Result<T> = std::result::Result<T, UserError>;
