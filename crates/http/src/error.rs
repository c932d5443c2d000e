//! Error handling for the shelf HTTP layer
//!
//! Every failure leaves the server as an [`Envelope`] with `success: false`,
//! so clients handle all verbs through one code path.

use axum::{
    http::{header::ALLOW, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use shelf_contracts::{Envelope, ValidationError};
use thiserror::Error;
use uuid::Uuid;

/// Message sent for every unclassified failure. Details stay in the logs.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("bad request: {message}")]
    BadRequest { message: String },

    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("method {method} not allowed")]
    MethodNotAllowed {
        method: Method,
        allow: &'static str,
    },

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a method-not-allowed error; `allow` becomes the `Allow` header.
    pub fn method_not_allowed(method: Method, allow: &'static str) -> Self {
        Self::MethodNotAllowed { method, allow }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let error_id = Uuid::new_v4();
        let status = self.status();

        let (message, allow) = match self {
            ApiError::BadRequest { message } | ApiError::NotFound { message } => (message, None),
            ApiError::MethodNotAllowed { method, allow } => {
                (format!("Method {} not allowed", method), Some(allow))
            }
            ApiError::Internal(err) => {
                tracing::error!(
                    error_id = %error_id,
                    error = ?err,
                    "unhandled error while serving request"
                );
                (INTERNAL_ERROR_MESSAGE.to_string(), None)
            }
        };

        tracing::warn!(
            error_id = %error_id,
            status_code = %status.as_u16(),
            message = %message,
            "Request error"
        );

        let mut response = (status, Json(Envelope::<()>::failure(message))).into_response();
        if let Some(allow) = allow {
            response
                .headers_mut()
                .insert(ALLOW, HeaderValue::from_static(allow));
        }
        response
    }
}
