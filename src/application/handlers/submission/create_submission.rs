//! CreateSubmissionHandler - Command handler for new submissions.

use std::sync::Arc;

use crate::domain::foundation::CommandMetadata;
use crate::domain::schema::{FormType, SchemaError};
use crate::domain::submission::{Submission, SubmissionError};
use crate::domain::validation::{Payload, ValidationEngine};
use crate::ports::{SchemaRepository, SubmissionRepository};

/// Command to create a submission against the latest schema of a form type.
#[derive(Debug, Clone)]
pub struct CreateSubmissionCommand {
    pub form_type: FormType,
    pub data: Payload,
    pub is_draft: bool,
}

/// Handler for creating submissions.
///
/// The payload is validated and normalized against the latest schema and
/// the submission is pinned to that version. A non-draft creation is
/// stored together with its "Initial submission" audit entry.
pub struct CreateSubmissionHandler {
    schemas: Arc<dyn SchemaRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    engine: Arc<ValidationEngine>,
}

impl CreateSubmissionHandler {
    pub fn new(
        schemas: Arc<dyn SchemaRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        engine: Arc<ValidationEngine>,
    ) -> Self {
        Self {
            schemas,
            submissions,
            engine,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateSubmissionCommand,
        metadata: CommandMetadata,
    ) -> Result<Submission, SubmissionError> {
        let schema = self
            .schemas
            .latest(cmd.form_type)
            .await
            .map_err(SchemaError::from)?
            .ok_or_else(|| SchemaError::not_found(cmd.form_type))?;

        let data = self.engine.validate(&schema, &cmd.data)?;

        let submission = Submission::create(
            cmd.form_type,
            schema.version,
            metadata.user_id.clone(),
            data,
            cmd.is_draft,
        );

        self.submissions
            .insert(&submission, &submission.creation_audit())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to store submission");
                SubmissionError::from(e)
            })?;

        tracing::info!(
            submission_id = %submission.id,
            form_type = %submission.form_type,
            schema_version = submission.schema_version,
            status = %submission.status,
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            "Submission created"
        );

        Ok(submission)
    }
}
