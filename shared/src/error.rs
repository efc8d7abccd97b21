//! Wire-level error types
//!
//! The directory server replies to a failed operation with a JSON body
//! `{ "error": <message>, "code": <code>, "dependentCount": <n> }` and
//! a 4xx/5xx status. Codes are stable strings so that clients can map
//! them back to typed errors without parsing messages.

use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Stable error codes shared by server and client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A field failed validation before any data access
    ValidationFailed,
    /// Email already used by another employee
    DuplicateEmail,
    /// A CEO already exists; only one is allowed
    CeoExists,
    /// Other employees still report to the target employee
    RoleHasDependents,
    /// Target employee does not exist
    NotFound,
    /// The `type` field named no recognized operation
    UnsupportedOperation,
    /// Unexpected server-side failure
    Internal,
}

impl ErrorCode {
    /// HTTP status for responses carrying this code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::ValidationFailed
            | ErrorCode::DuplicateEmail
            | ErrorCode::CeoExists
            | ErrorCode::RoleHasDependents
            | ErrorCode::UnsupportedOperation => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(s.trim_matches('"'))
    }
}

/// Application error carried between handler and response
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
    /// Number of employees still reporting to the target, when relevant
    pub dependent_count: Option<usize>,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            dependent_count: None,
        }
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, msg)
    }

    pub fn duplicate_email() -> Self {
        Self::new(ErrorCode::DuplicateEmail, "Email already exists")
    }

    pub fn ceo_exists() -> Self {
        Self::new(
            ErrorCode::CeoExists,
            "A CEO already exists in the system. Only one CEO is allowed.",
        )
    }

    pub fn role_has_dependents(msg: impl Into<String>, dependent_count: usize) -> Self {
        Self {
            code: ErrorCode::RoleHasDependents,
            message: msg.into(),
            dependent_count: Some(dependent_count),
        }
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, format!("{} not found", resource.into()))
    }

    pub fn unsupported_operation() -> Self {
        Self::new(ErrorCode::UnsupportedOperation, "Unsupported request type")
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::Internal, msg)
    }
}

/// Type alias for Result with ApiError
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of an error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<ErrorCode>,
    #[serde(
        rename = "dependentCount",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub dependent_count: Option<usize>,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.message.clone(),
            code: Some(err.code),
            dependent_count: err.dependent_count,
        }
    }
}

impl ErrorBody {
    /// Reconstruct a typed error from a decoded body, falling back to
    /// Internal when the body carries no recognizable code.
    pub fn into_api_error(self) -> ApiError {
        ApiError {
            code: self.code.unwrap_or(ErrorCode::Internal),
            message: self.error,
            dependent_count: self.dependent_count,
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        if self.code == ErrorCode::Internal {
            tracing::error!(code = %self.code, message = %self.message, "Internal error");
        }

        let status = self.http_status();
        let body = ErrorBody::from(&self);
        (status, Json(body)).into_response()
    }
}
