//! SubmitDraftHandler - Command handler for sending a draft to review.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SubmissionId};
use crate::domain::schema::SchemaError;
use crate::domain::submission::{Submission, SubmissionError};
use crate::domain::validation::ValidationEngine;
use crate::ports::{SchemaRepository, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct SubmitDraftCommand {
    pub submission_id: SubmissionId,
}

/// Handler moving an owner's draft to `Submitted`.
///
/// The stored payload is validated again against the pinned schema first.
pub struct SubmitDraftHandler {
    schemas: Arc<dyn SchemaRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    engine: Arc<ValidationEngine>,
}

impl SubmitDraftHandler {
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
        cmd: SubmitDraftCommand,
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
            tracing::warn!(submission_id = %id, user_id = %metadata.user_id, "Draft submit denied");
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
        submission.data = self.engine.validate(&schema, &submission.data)?;

        let expected = submission.revision;
        let entry = submission.submit(&metadata.user_id)?;

        self.submissions
            .update(&submission, expected, &[entry])
            .await
            .map_err(|e| SubmissionError::from_port(id, e))?;

        tracing::info!(
            submission_id = %id,
            correlation_id = %metadata.correlation_id(),
            "Draft submitted"
        );

        Ok(submission)
    }
}
