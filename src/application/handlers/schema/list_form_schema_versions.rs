//! ListFormSchemaVersionsHandler - Query handler for a form type's version history.

use std::sync::Arc;

use crate::domain::schema::{FormSchema, FormType, SchemaError};
use crate::ports::SchemaRepository;

#[derive(Debug, Clone)]
pub struct ListFormSchemaVersionsQuery {
    pub form_type: FormType,
}

pub struct ListFormSchemaVersionsHandler {
    repository: Arc<dyn SchemaRepository>,
}

impl ListFormSchemaVersionsHandler {
    pub fn new(repository: Arc<dyn SchemaRepository>) -> Self {
        Self { repository }
    }

    /// Newest first. An unpublished form type yields an empty list.
    pub async fn handle(
        &self,
        query: ListFormSchemaVersionsQuery,
    ) -> Result<Vec<FormSchema>, SchemaError> {
        Ok(self.repository.list(query.form_type).await?)
    }
}
