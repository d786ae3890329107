//! GetLatestFormSchemaHandler - Query handler for the current schema of a form type.

use std::sync::Arc;

use crate::domain::schema::{FormSchema, FormType, SchemaError};
use crate::ports::SchemaRepository;

#[derive(Debug, Clone)]
pub struct GetLatestFormSchemaQuery {
    pub form_type: FormType,
}

pub struct GetLatestFormSchemaHandler {
    repository: Arc<dyn SchemaRepository>,
}

impl GetLatestFormSchemaHandler {
    pub fn new(repository: Arc<dyn SchemaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: GetLatestFormSchemaQuery) -> Result<FormSchema, SchemaError> {
        self.repository
            .latest(query.form_type)
            .await?
            .ok_or_else(|| SchemaError::not_found(query.form_type))
    }
}
