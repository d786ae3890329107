//! HTTP DTOs for form schema endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::schema::{FieldSpec, FormSchema};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to publish the next schema version.
///
/// A missing `schema` key is treated as an empty list so it is reported as
/// "Schema cannot be empty" rather than a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFormSchemaRequest {
    #[serde(default)]
    pub schema: Vec<FieldSpec>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One published schema version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchemaResponse {
    pub form_type: String,
    pub version: u32,
    pub schema: Vec<FieldSpec>,
    pub created_at: String,
}

impl From<&FormSchema> for FormSchemaResponse {
    fn from(schema: &FormSchema) -> Self {
        Self {
            form_type: schema.form_type.as_str().to_string(),
            version: schema.version,
            schema: schema.fields().iter().cloned().map(FieldSpec::from).collect(),
            created_at: schema.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Version history of a form type, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormSchemaListResponse {
    pub form_type: String,
    pub versions: Vec<FormSchemaResponse>,
}
