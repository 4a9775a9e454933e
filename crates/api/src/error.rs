//! API error types with HTTP response mapping.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::UserError;
use domain::{DomainError, OwnershipError, ValidationError};
use orchestration::{EditError, PlacementError};
use projections::ProjectionError;
use serde_json::json;

/// API-level error type that maps to HTTP responses.
///
/// The body is always `{"error": ...}`: a message string, or the platform's
/// user errors verbatim.
#[derive(Debug)]
pub enum ApiError {
    /// Bad request from the client.
    BadRequest(String),
    /// The order does not carry the caller's identity tag.
    Forbidden(String),
    /// Resource not found.
    NotFound(String),
    /// The platform rejected a mutation.
    Rejected(Vec<UserError>),
    /// Internal server error.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Rejected(_) => StatusCode::BAD_REQUEST,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        metrics::counter!("api_errors_total", "status" => status.as_u16().to_string()).increment(1);
        let body = match self {
            ApiError::Rejected(errors) => json!({ "error": errors }),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                json!({ "error": msg })
            }
            ApiError::BadRequest(msg) | ApiError::Forbidden(msg) | ApiError::NotFound(msg) => {
                json!({ "error": msg })
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<OwnershipError> for ApiError {
    fn from(err: OwnershipError) -> Self {
        match err {
            OwnershipError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            OwnershipError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            OwnershipError::Gateway(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(err) => err.into(),
            DomainError::Ownership(err) => err.into(),
            DomainError::Rejected { errors, .. } => ApiError::Rejected(errors),
            DomainError::Gateway(_) | DomainError::MissingResource { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<EditError> for ApiError {
    fn from(err: EditError) -> Self {
        match err {
            EditError::Ownership(err) => err.into(),
            EditError::EditBeginFailed { errors }
            | EditError::DiscountFailed { errors }
            | EditError::RemoveFailed { errors }
            | EditError::AddFailed { errors }
            | EditError::CommitFailed { errors } => ApiError::Rejected(errors),
            EditError::EditSessionUnavailable | EditError::NoTargetLineItem => {
                ApiError::BadRequest(err.to_string())
            }
            EditError::Gateway(_) | EditError::InvalidTransition { .. } => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<PlacementError> for ApiError {
    fn from(err: PlacementError) -> Self {
        match err {
            PlacementError::Step { source, .. } => source.into(),
        }
    }
}

impl From<ProjectionError> for ApiError {
    fn from(err: ProjectionError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
