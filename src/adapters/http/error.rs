//! Shared error body and error→status mapping for all routers.
//!
//! Every failure leaves the API as `{code, message}` with an optional
//! `details` object. Persistence faults are logged and replaced with a
//! generic message.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::schema::SchemaError;
use crate::domain::submission::SubmissionError;

/// Standard error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new("FORBIDDEN", message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new("UNAUTHORIZED", message)
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Pairs the body with a status code.
    pub fn into_response_with(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::FieldValidationFailed
        | ErrorCode::InvalidStateTransition => StatusCode::BAD_REQUEST,
        ErrorCode::SchemaNotFound | ErrorCode::SubmissionNotFound => StatusCode::NOT_FOUND,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::ConcurrencyConflict => StatusCode::CONFLICT,
        ErrorCode::UnknownFieldType | ErrorCode::DatabaseError | ErrorCode::InternalError => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn domain_error_response(
    code: ErrorCode,
    message: String,
    details: Option<serde_json::Value>,
) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(code = %code, "{}", message);
        return ErrorResponse::new(code.to_string(), "Internal server error")
            .into_response_with(status);
    }

    let body = ErrorResponse::new(code.to_string(), message);
    match details {
        Some(details) => body.with_details(details).into_response_with(status),
        None => body.into_response_with(status),
    }
}

/// Maps a schema registry error to an HTTP response.
pub fn handle_schema_error(error: SchemaError) -> Response {
    domain_error_response(error.code(), error.message(), None)
}

/// Maps a submission error to an HTTP response.
///
/// Field validation failures carry the offending field in `details`.
pub fn handle_submission_error(error: SubmissionError) -> Response {
    let details = match &error {
        SubmissionError::Validation(field_error) => {
            Some(serde_json::json!({ "field": field_error.field() }))
        }
        _ => None,
    };
    domain_error_response(error.code(), error.message(), details)
}

/// Malformed JSON bodies become 400 with the standard error body.
pub fn handle_json_rejection(rejection: JsonRejection) -> Response {
    ErrorResponse::bad_request(rejection.body_text()).into_response_with(StatusCode::BAD_REQUEST)
}

pub fn handle_query_rejection(rejection: QueryRejection) -> Response {
    ErrorResponse::bad_request(rejection.body_text()).into_response_with(StatusCode::BAD_REQUEST)
}
