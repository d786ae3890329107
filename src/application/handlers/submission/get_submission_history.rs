//! GetSubmissionHistoryHandler - Query handler for a submission's audit trail.

use std::sync::Arc;

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{CommandMetadata, SubmissionId};
use crate::domain::submission::SubmissionError;
use crate::ports::{AuditLog, SubmissionRepository};

#[derive(Debug, Clone)]
pub struct GetSubmissionHistoryQuery {
    pub submission_id: SubmissionId,
}

/// Handler returning audit entries, oldest first, for a visible submission.
pub struct GetSubmissionHistoryHandler {
    submissions: Arc<dyn SubmissionRepository>,
    audit: Arc<dyn AuditLog>,
}

impl GetSubmissionHistoryHandler {
    pub fn new(submissions: Arc<dyn SubmissionRepository>, audit: Arc<dyn AuditLog>) -> Self {
        Self { submissions, audit }
    }

    pub async fn handle(
        &self,
        query: GetSubmissionHistoryQuery,
        metadata: CommandMetadata,
    ) -> Result<Vec<AuditEntry>, SubmissionError> {
        let id = query.submission_id;
        let visible = self
            .submissions
            .find_by_id(&id)
            .await?
            .is_some_and(|s| s.is_visible_to(&metadata.user_id, metadata.role));
        if !visible {
            return Err(SubmissionError::NotFound(id));
        }

        Ok(self.audit.history(&id).await?)
    }
}
