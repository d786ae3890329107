//! GetFormSchemaVersionHandler - Query handler for one numbered schema snapshot.

use std::sync::Arc;

use crate::domain::schema::{FormSchema, FormType, SchemaError};
use crate::ports::SchemaRepository;

#[derive(Debug, Clone)]
pub struct GetFormSchemaVersionQuery {
    pub form_type: FormType,
    pub version: u32,
}

pub struct GetFormSchemaVersionHandler {
    repository: Arc<dyn SchemaRepository>,
}

impl GetFormSchemaVersionHandler {
    pub fn new(repository: Arc<dyn SchemaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetFormSchemaVersionQuery) -> Result<FormSchema, SchemaError> {
        self.repository
            .find_version(query.form_type, query.version)
            .await?
            .ok_or_else(|| SchemaError::version_not_found(query.form_type, query.version))
    }
}
