//! Axum-specific error types and mappings.
//!
//! This module provides the adapter's error type and the mapping from
//! `CoreError` kinds to HTTP status codes and JSON bodies.

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use teatrack_core::{AuthError, CoreError, ErrorKind, RepositoryError};
use thiserror::Error;
use tracing::error;

/// Axum-specific error type.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Bad request (missing or malformed input).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Missing, malformed or expired bearer credential.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (resource already exists).
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HttpError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The stable error kind reported in the `type` field.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::BadRequest(_) => ErrorKind::Validation,
            Self::Unauthorized(_) => ErrorKind::Authentication,
            Self::Forbidden(_) => ErrorKind::Authorization,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Conflict(_) => ErrorKind::Conflict,
            Self::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// JSON error response body.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    status: u16,
    /// Stable error type discriminant for client-side handling
    #[serde(rename = "type")]
    error_type: &'static str,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.kind().as_str();
        let message = match self {
            Self::BadRequest(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Internal(msg) => msg,
        };

        let body = ErrorBody {
            error: message,
            status: status.as_u16(),
            error_type,
        };

        let mut response = (status, axum::Json(body)).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<CoreError> for HttpError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::BadRequest(msg),
            CoreError::Conflict(msg) => Self::Conflict(msg),
            CoreError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            CoreError::Forbidden(msg) => Self::Forbidden(msg),
            CoreError::Unauthenticated(auth) => auth.into(),
            CoreError::Repository(repo_err) => repo_err.into(),
            CoreError::Internal(msg) => {
                error!(error = %msg, "Internal error");
                Self::Internal(msg)
            }
        }
    }
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(format!("{what} not found")),
            RepositoryError::AlreadyExists(msg) => Self::Conflict(msg),
            RepositoryError::Constraint(msg) => Self::BadRequest(msg),
            RepositoryError::Storage(msg) | RepositoryError::Serialization(msg) => {
                error!(error = %msg, "Storage failure");
                Self::Internal("Storage error".to_string())
            }
        }
    }
}

impl From<AuthError> for HttpError {
    fn from(err: AuthError) -> Self {
        let message = match err {
            AuthError::Missing => "No token, authorization denied".to_string(),
            AuthError::Expired => "Token expired".to_string(),
            AuthError::Malformed(_) | AuthError::InvalidSignature => {
                "Token is not valid".to_string()
            }
        };
        Self::Unauthorized(message)
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}
