//! Submission-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | NotEditable | 403 |
//! | InvalidTransition | 400 |
//! | Validation | 400 |
//! | InvalidFilter | 400 |
//! | Schema | per SchemaError |
//! | Conflict | 409 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, SubmissionId};
use crate::domain::schema::SchemaError;
use crate::domain::validation::FieldError;

use super::SubmissionStatus;

/// Errors raised by submission commands and queries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("Submission not found: {0}")]
    NotFound(SubmissionId),

    /// Not the caller's draft. Also returned for ids that do not exist, so
    /// draft edits never reveal whether someone else's record is there.
    #[error("unauthorized or invalid status")]
    NotEditable(SubmissionId),

    #[error("invalid status transition from {from} to {to}")]
    InvalidTransition {
        from: SubmissionStatus,
        to: SubmissionStatus,
    },

    #[error(transparent)]
    Validation(#[from] FieldError),

    #[error("invalid {field}: {reason}")]
    InvalidFilter { field: String, reason: String },

    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error("Submission {0} was modified concurrently")]
    Conflict(SubmissionId),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl SubmissionError {
    pub fn invalid_filter(field: impl Into<String>, reason: impl Into<String>) -> Self {
        SubmissionError::InvalidFilter {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SubmissionError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubmissionError::NotFound(_) => ErrorCode::SubmissionNotFound,
            SubmissionError::NotEditable(_) => ErrorCode::Forbidden,
            SubmissionError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SubmissionError::Validation(_) => ErrorCode::FieldValidationFailed,
            SubmissionError::InvalidFilter { .. } => ErrorCode::ValidationFailed,
            SubmissionError::Schema(err) => err.code(),
            SubmissionError::Conflict(_) => ErrorCode::ConcurrencyConflict,
            SubmissionError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Maps a port error for a specific submission.
    pub fn from_port(id: SubmissionId, err: DomainError) -> Self {
        match err.code {
            ErrorCode::SubmissionNotFound => SubmissionError::NotFound(id),
            ErrorCode::ConcurrencyConflict => SubmissionError::Conflict(id),
            ErrorCode::UnknownFieldType => SubmissionError::Schema(err.into()),
            _ => SubmissionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<DomainError> for SubmissionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UnknownFieldType => SubmissionError::Schema(err.into()),
            _ => SubmissionError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SubmissionError> for DomainError {
    fn from(err: SubmissionError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
