//! Schema registry command and query handlers.

mod create_form_schema;
mod get_form_schema_version;
mod get_latest_form_schema;
mod list_form_schema_versions;

pub use create_form_schema::{CreateFormSchemaCommand, CreateFormSchemaHandler};
pub use get_form_schema_version::{GetFormSchemaVersionHandler, GetFormSchemaVersionQuery};
pub use get_latest_form_schema::{GetLatestFormSchemaHandler, GetLatestFormSchemaQuery};
pub use list_form_schema_versions::{ListFormSchemaVersionsHandler, ListFormSchemaVersionsQuery};
