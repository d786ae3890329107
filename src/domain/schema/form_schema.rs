//! Versioned form schema.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

use super::{FieldDefinition, FieldSpec, FormType, SchemaError};

/// One immutable, numbered snapshot of a form's field definitions.
///
/// # Invariants
///
/// - `version >= 1`
/// - field names are unique within the snapshot
/// - field order is the order fields are validated in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub form_type: FormType,
    pub version: u32,
    fields: Vec<FieldDefinition>,
    pub created_at: Timestamp,
}

impl FormSchema {
    /// Creates a schema snapshot, rejecting a zero version or duplicate names.
    pub fn new(
        form_type: FormType,
        version: u32,
        fields: Vec<FieldDefinition>,
        created_at: Timestamp,
    ) -> Result<Self, SchemaError> {
        if version == 0 {
            return Err(SchemaError::InvalidVersion);
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self {
            form_type,
            version,
            fields,
            created_at,
        })
    }

    /// Builds the first or next version from wire field specs.
    pub fn from_specs(
        form_type: FormType,
        version: u32,
        specs: Vec<FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let fields = parse_fields(specs)?;
        Self::new(form_type, version, fields, Timestamp::now())
    }

    /// Field definitions in validation order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Version number the next snapshot of this form type must take.
    pub fn next_version(&self) -> u32 {
        self.version + 1
    }
}

/// Converts wire specs into typed definitions, stopping at the first bad one.
pub fn parse_fields(specs: Vec<FieldSpec>) -> Result<Vec<FieldDefinition>, SchemaError> {
    specs.into_iter().map(FieldDefinition::try_from).collect()
}
