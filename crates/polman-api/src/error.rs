//! # API Error Types
//!
//! Structured error type implementing `axum::response::IntoResponse`.
//! Maps domain failures to HTTP status codes and the JSON error body
//! shared by every non-2xx response:
//!
//! ```json
//! {"timestamp": "...", "message": "...", "status": 400}
//! ```
//!
//! Field-validation failures additionally carry an `errors` object keyed
//! by wire field name, with `message` fixed to `"Validation failed"`.
//! Nothing is swallowed or retried; server-side errors are logged via
//! `tracing` before the response is built.

use std::collections::BTreeMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use polman_core::{CoverageDateError, FieldErrors, PageRequestError};

/// JSON error response body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Local wall-clock time the error response was built.
    pub timestamp: NaiveDateTime,
    /// Human-readable message.
    pub message: String,
    /// HTTP status code, repeated in the body.
    pub status: u16,
    /// Field → message map, present only for field-validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<BTreeMap<String, String>>,
}

/// Application-level error type that implements [`IntoResponse`] for Axum.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested policy id is absent from storage (404).
    #[error("{0}")]
    NotFound(String),

    /// One or more required fields missing or blank (400). Carries the
    /// per-field messages collected by the presence pass.
    #[error("Validation failed")]
    Validation(FieldErrors),

    /// Coverage-date invariant violated (400). Single message, not
    /// field-scoped.
    #[error("{0}")]
    InvalidDates(#[from] CoverageDateError),

    /// Malformed request body or rejected query parameters (400).
    #[error("{0}")]
    BadRequest(String),

    /// Any other failure (500). The detail is logged and echoed behind a
    /// generic prefix.
    #[error("An unexpected error occurred: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::InvalidDates(_) | Self::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Construct a not-found error for a policy id.
    pub fn policy_not_found(id: i64) -> Self {
        Self::NotFound(format!("Policy not found with id: {id}"))
    }
}

impl From<PageRequestError> for ApiError {
    fn from(err: PageRequestError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "internal server error");
        }

        let errors = match &self {
            Self::Validation(fields) => Some(fields.as_map().clone()),
            _ => None,
        };

        let body = ErrorBody {
            timestamp: chrono::Local::now().naive_local(),
            message: self.to_string(),
            status: status.as_u16(),
            errors,
        };

        (status, Json(body)).into_response()
    }
}
