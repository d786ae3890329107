//! Schema-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidFormType | 400 |
//! | UnknownFieldType | 400 |
//! | EmptyFieldName | 400 |
//! | DuplicateField | 400 |
//! | EmptySchema | 400 |
//! | InvalidVersion | 400 |
//! | NotFound | 404 |
//! | Conflict | 409 |
//! | Corrupt | 500 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode};

use super::FormType;

/// Errors raised while authoring, loading or looking up form schemas.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown form type: {0}")]
    InvalidFormType(String),

    /// A field declares a `type` outside the supported set.
    #[error("unknown type {field_type} for {field}")]
    UnknownFieldType { field: String, field_type: String },

    #[error("field name cannot be empty")]
    EmptyFieldName,

    #[error("duplicate field name: {0}")]
    DuplicateField(String),

    #[error("Schema cannot be empty")]
    EmptySchema,

    #[error("schema version must be positive")]
    InvalidVersion,

    #[error("{}", not_found_message(.form_type, .version))]
    NotFound {
        form_type: FormType,
        version: Option<u32>,
    },

    /// Another writer published the same version first.
    #[error("version conflict for {form_type}: {message}")]
    Conflict { form_type: FormType, message: String },

    /// A stored schema no longer parses.
    #[error("stored schema is corrupt: {0}")]
    Corrupt(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

fn not_found_message(form_type: &FormType, version: &Option<u32>) -> String {
    match version {
        Some(v) => format!("No schema version {} for {}", v, form_type),
        None => format!("No schema published for {}", form_type),
    }
}

impl SchemaError {
    pub fn invalid_form_type(value: impl Into<String>) -> Self {
        SchemaError::InvalidFormType(value.into())
    }

    pub fn unknown_field_type(field: impl Into<String>, field_type: impl Into<String>) -> Self {
        SchemaError::UnknownFieldType {
            field: field.into(),
            field_type: field_type.into(),
        }
    }

    pub fn not_found(form_type: FormType) -> Self {
        SchemaError::NotFound {
            form_type,
            version: None,
        }
    }

    pub fn version_not_found(form_type: FormType, version: u32) -> Self {
        SchemaError::NotFound {
            form_type,
            version: Some(version),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SchemaError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SchemaError::InvalidFormType(_)
            | SchemaError::UnknownFieldType { .. }
            | SchemaError::EmptyFieldName
            | SchemaError::DuplicateField(_)
            | SchemaError::EmptySchema
            | SchemaError::InvalidVersion => ErrorCode::ValidationFailed,
            SchemaError::NotFound { .. } => ErrorCode::SchemaNotFound,
            SchemaError::Conflict { .. } => ErrorCode::ConcurrencyConflict,
            SchemaError::Corrupt(_) => ErrorCode::UnknownFieldType,
            SchemaError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl From<DomainError> for SchemaError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::UnknownFieldType => SchemaError::Corrupt(err.message),
            _ => SchemaError::Infrastructure(err.to_string()),
        }
    }
}

impl From<SchemaError> for DomainError {
    fn from(err: SchemaError) -> Self {
        DomainError::new(err.code(), err.message())
    }
}
