//! Error types for the waitlist service.

use crate::validate::FieldErrors;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use signup_store::StoreError;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;
use uuid::Uuid;

/// Service error types.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more submitted fields failed validation. Carries the
    /// per-field violations for the response body.
    #[error("Please correct the errors below.")]
    Validation(FieldErrors),

    #[error("Signup not found: {0}")]
    NotFound(Uuid),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The display string is deliberately generic; the detail is logged,
    /// not surfaced to the submitter.
    #[error("An error occurred. Please try again.")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,

    /// Field name -> violations, present on validation failures only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::RateLimitExceeded => (StatusCode::TOO_MANY_REQUESTS, "RATE_LIMIT_EXCEEDED"),
            ApiError::Storage(detail) => {
                warn!(detail = %detail, "Storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "STORAGE_ERROR")
            }
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let fields = match &self {
            ApiError::Validation(errors) => Some(errors.clone().into_map()),
            _ => None,
        };

        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    /// A uniqueness conflict at commit time is the race-losing twin of a
    /// validator-detected duplicate and must read identically to the
    /// submitter.
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::DuplicateEmail(_) => ApiError::Validation(FieldErrors::duplicate_email()),
            StoreError::DuplicatePhone(_) => ApiError::Validation(FieldErrors::duplicate_phone()),
            StoreError::DuplicatePair => ApiError::Validation(FieldErrors::duplicate_pair()),
            StoreError::NotFound(id) => ApiError::NotFound(id),
            other => ApiError::Storage(other.to_string()),
        }
    }
}
