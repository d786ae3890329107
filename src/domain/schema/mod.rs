//! Form schema domain module.
//!
//! - `form_type` - FormType categories
//! - `field` - FieldDefinition, FieldKind and the wire FieldSpec
//! - `form_schema` - FormSchema versioned snapshot
//! - `errors` - SchemaError

mod errors;
mod field;
mod form_schema;
mod form_type;

pub use errors::SchemaError;
pub use field::{FieldDefinition, FieldKind, FieldSpec};
pub use form_schema::{parse_fields, FormSchema};
pub use form_type::FormType;
