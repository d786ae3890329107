//! Schema repository port.
//!
//! Stores immutable schema versions. The store owns the uniqueness of
//! `(form_type, version)`; the registry relies on it to detect two writers
//! racing for the same version number.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::schema::{FormSchema, FormType};

/// Repository port for versioned form schemas.
#[async_trait]
pub trait SchemaRepository: Send + Sync {
    /// Insert a new schema version.
    ///
    /// # Errors
    ///
    /// - `ConcurrencyConflict` if the `(form_type, version)` pair already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, schema: &FormSchema) -> Result<(), DomainError>;

    /// Schema with the highest version for a form type, if any.
    ///
    /// # Errors
    ///
    /// - `UnknownFieldType` if the stored fields no longer parse
    /// - `DatabaseError` on persistence failure
    async fn latest(&self, form_type: FormType) -> Result<Option<FormSchema>, DomainError>;

    /// A specific version of a form type's schema.
    async fn find_version(
        &self,
        form_type: FormType,
        version: u32,
    ) -> Result<Option<FormSchema>, DomainError>;

    /// All versions of a form type, highest version first.
    async fn list(&self, form_type: FormType) -> Result<Vec<FormSchema>, DomainError>;
}
