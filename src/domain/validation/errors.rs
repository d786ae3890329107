//! Field-level validation failures.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

/// The first constraint a payload violated.
///
/// Display text is the message returned to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{field} is required")]
    Required { field: String },

    #[error("{field} must be string")]
    NotString { field: String },

    #[error("{field} exceeds max length {max}")]
    TooLong { field: String, max: usize },

    #[error("{field} below min length {min}")]
    TooShort { field: String, min: usize },

    #[error("{field} must be integer")]
    NotInteger { field: String },

    #[error("{field} below min {min}")]
    BelowMin { field: String, min: i64 },

    #[error("{field} exceeds max {max}")]
    AboveMax { field: String, max: i64 },

    #[error("{field} invalid URL")]
    InvalidUrl { field: String },

    #[error("{field} invalid email")]
    InvalidEmail { field: String },

    #[error("{field} invalid option: {value}")]
    InvalidOption { field: String, value: String },

    #[error("{field} must be numeric")]
    NotNumeric { field: String },
}

impl FieldError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            FieldError::Required { field }
            | FieldError::NotString { field }
            | FieldError::TooLong { field, .. }
            | FieldError::TooShort { field, .. }
            | FieldError::NotInteger { field }
            | FieldError::BelowMin { field, .. }
            | FieldError::AboveMax { field, .. }
            | FieldError::InvalidUrl { field }
            | FieldError::InvalidEmail { field }
            | FieldError::InvalidOption { field, .. }
            | FieldError::NotNumeric { field } => field,
        }
    }
}

impl From<FieldError> for DomainError {
    fn from(err: FieldError) -> Self {
        let field = err.field().to_string();
        DomainError::new(ErrorCode::FieldValidationFailed, err.to_string()).with_detail("field", field)
    }
}
