//! Application error type shared by every layer.
//!
//! Services raise an [`AppError`] tagged with an [`ErrorKind`]; the HTTP layer
//! renders it through [`IntoResponse`] using the status code bound to the kind.
//! Nothing in the service layer retries or downgrades an error.

use anyhow::Error;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

/// Failure categories raised by the registration core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced entity does not exist.
    NotFound,
    /// Duplicate enrollment, double registration or a booking overlap.
    Conflict,
    /// The offered course section is full.
    CapacityExceeded,
    /// The operation was attempted in the wrong lifecycle phase.
    InvalidState,
    /// Illegal registration status change.
    InvalidTransition,
    /// Client-correctable input problems (credit bounds, empty enrollment, ...).
    BadRequest,
    Unauthorized,
    Forbidden,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict | ErrorKind::CapacityExceeded => StatusCode::CONFLICT,
            ErrorKind::InvalidState | ErrorKind::InvalidTransition | ErrorKind::BadRequest => {
                StatusCode::BAD_REQUEST
            }
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable snake_case label, used for metric labels.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::CapacityExceeded => "capacity_exceeded",
            ErrorKind::InvalidState => "invalid_state",
            ErrorKind::InvalidTransition => "invalid_transition",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Unauthorized => "unauthorized",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::Internal => "internal",
        }
    }
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub status: StatusCode,
    pub error: Error,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            status: kind.status(),
            error: err.into(),
        }
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn conflict<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Conflict, err)
    }

    pub fn capacity_exceeded<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::CapacityExceeded, err)
    }

    pub fn invalid_state<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidState, err)
    }

    pub fn invalid_transition<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidTransition, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn unauthorized(message: String) -> Self {
        Self::new(ErrorKind::Unauthorized, anyhow::anyhow!(message))
    }

    pub fn forbidden(message: String) -> Self {
        Self::new(ErrorKind::Forbidden, anyhow::anyhow!(message))
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    /// The driver-level error, if `err` came back from Postgres.
    fn database_error(err: &sqlx::Error) -> Option<&dyn sqlx::error::DatabaseError> {
        match err {
            sqlx::Error::Database(db_err) => Some(db_err.as_ref()),
            _ => None,
        }
    }

    /// True if `err` is a unique-constraint violation.
    pub fn is_unique_violation(err: &sqlx::Error) -> bool {
        Self::database_error(err).is_some_and(|db_err| db_err.is_unique_violation())
    }

    /// True if `err` is a foreign-key violation.
    pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
        Self::database_error(err).is_some_and(|db_err| db_err.is_foreign_key_violation())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.error.to_string()
        }));

        (self.status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::not_found(anyhow::anyhow!("Record not found")),
            other => AppError::internal(other),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::bad_request(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::internal(err)
    }
}
