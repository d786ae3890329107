//! CreateFormSchemaHandler - Command handler for publishing a schema version.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Timestamp};
use crate::domain::schema::{parse_fields, FieldSpec, FormSchema, FormType, SchemaError};
use crate::ports::SchemaRepository;

/// Command to publish the next version of a form type's schema.
#[derive(Debug, Clone)]
pub struct CreateFormSchemaCommand {
    pub form_type: FormType,
    pub fields: Vec<FieldSpec>,
}

/// Handler for publishing schemas.
///
/// Versions are gapless: the new version is one past the latest, or 1 for
/// the first. A concurrent writer that claims the same number causes one
/// re-read and retry; a second collision is reported as `Conflict`.
pub struct CreateFormSchemaHandler {
    repository: Arc<dyn SchemaRepository>,
}

impl CreateFormSchemaHandler {
    pub fn new(repository: Arc<dyn SchemaRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: CreateFormSchemaCommand,
        metadata: CommandMetadata,
    ) -> Result<FormSchema, SchemaError> {
        if cmd.fields.is_empty() {
            return Err(SchemaError::EmptySchema);
        }
        let fields = parse_fields(cmd.fields)?;

        let mut retried = false;
        loop {
            let version = self
                .repository
                .latest(cmd.form_type)
                .await?
                .map(|s| s.next_version())
                .unwrap_or(1);

            let schema = FormSchema::new(cmd.form_type, version, fields.clone(), Timestamp::now())?;

            match self.repository.insert(&schema).await {
                Ok(()) => {
                    tracing::info!(
                        form_type = %schema.form_type,
                        version = schema.version,
                        fields = schema.fields().len(),
                        user_id = %metadata.user_id,
                        correlation_id = %metadata.correlation_id(),
                        "Form schema published"
                    );
                    return Ok(schema);
                }
                Err(err) if err.is_conflict() && !retried => {
                    tracing::warn!(
                        form_type = %cmd.form_type,
                        version,
                        "Schema version taken by a concurrent writer, retrying"
                    );
                    retried = true;
                }
                Err(err) if err.is_conflict() => {
                    return Err(SchemaError::Conflict {
                        form_type: cmd.form_type,
                        message: err.message,
                    });
                }
                Err(err) => {
                    tracing::error!(form_type = %cmd.form_type, error = %err, "Failed to store schema");
                    return Err(err.into());
                }
            }
        }
    }
}
