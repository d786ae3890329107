//! UpdateDraftHandler - Command handler for replacing a draft's payload.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SubmissionId};
use crate::domain::schema::SchemaError;
use crate::domain::submission::{Submission, SubmissionError};
use crate::domain::validation::{Payload, ValidationEngine};
use crate::ports::{SchemaRepository, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct UpdateDraftCommand {
    pub submission_id: SubmissionId,
    pub data: Payload,
}

/// Handler for draft edits.
///
/// Only the owner may edit, and only while the submission is a draft. The
/// replacement is validated against the pinned schema version, never the
/// latest one.
pub struct UpdateDraftHandler {
    schemas: Arc<dyn SchemaRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    engine: Arc<ValidationEngine>,
}

impl UpdateDraftHandler {
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
        cmd: UpdateDraftCommand,
        metadata: CommandMetadata,
    ) -> Result<Submission, SubmissionError> {
        let id = cmd.submission_id;
        let mut submission = self
            .submissions
            .find_by_id(&id)
            .await?
            // Missing and foreign records share one error so ids cannot be guessed
            .ok_or(SubmissionError::NotEditable(id))?;

        if let Err(err) = submission.ensure_editable_by(&metadata.user_id) {
            tracing::warn!(submission_id = %id, user_id = %metadata.user_id, "Draft edit denied");
            return Err(err);
        }

        let schema = self
            .schemas
            .find_version(submission.form_type, submission.schema_version)
            .await
            .map_err(SchemaError::from)?
            .ok_or_else(|| {
                SchemaError::version_not_found(submission.form_type, submission.schema_version)
            })?;

        let data = self.engine.revalidate(&schema, &cmd.data, &submission.data)?;

        let expected = submission.revision;
        let entry = submission.edit_draft(&metadata.user_id, data)?;

        self.submissions
            .update(&submission, expected, &[entry])
            .await
            .map_err(|e| SubmissionError::from_port(id, e))?;

        tracing::info!(
            submission_id = %id,
            revision = submission.revision,
            correlation_id = %metadata.correlation_id(),
            "Draft updated"
        );

        Ok(submission)
    }
}
