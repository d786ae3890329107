//! In-memory schema repository.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::DomainError;
use crate::domain::schema::{FormSchema, FormType};
use crate::ports::SchemaRepository;

/// Schema versions per form type, kept in ascending version order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySchemaRepository {
    schemas: Arc<RwLock<HashMap<FormType, Vec<FormSchema>>>>,
}

impl InMemorySchemaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchemaRepository for InMemorySchemaRepository {
    async fn insert(&self, schema: &FormSchema) -> Result<(), DomainError> {
        let mut schemas = self.schemas.write().await;
        let versions = schemas.entry(schema.form_type).or_default();

        if versions.iter().any(|s| s.version == schema.version) {
            return Err(DomainError::conflict(format!(
                "Schema {} version {} already exists",
                schema.form_type, schema.version
            )));
        }

        let at = versions.partition_point(|s| s.version < schema.version);
        versions.insert(at, schema.clone());
        Ok(())
    }

    async fn latest(&self, form_type: FormType) -> Result<Option<FormSchema>, DomainError> {
        let schemas = self.schemas.read().await;
        Ok(schemas.get(&form_type).and_then(|v| v.last()).cloned())
    }

    async fn find_version(
        &self,
        form_type: FormType,
        version: u32,
    ) -> Result<Option<FormSchema>, DomainError> {
        let schemas = self.schemas.read().await;
        Ok(schemas
            .get(&form_type)
            .and_then(|v| v.iter().find(|s| s.version == version))
            .cloned())
    }

    async fn list(&self, form_type: FormType) -> Result<Vec<FormSchema>, DomainError> {
        let schemas = self.schemas.read().await;
        Ok(schemas
            .get(&form_type)
            .map(|v| v.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}
