//! GetSubmissionHandler - Query handler for a single submission.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SubmissionId};
use crate::domain::submission::{Submission, SubmissionError};
use crate::ports::SubmissionRepository;

#[derive(Debug, Clone)]
pub struct GetSubmissionQuery {
    pub submission_id: SubmissionId,
}

/// Handler for retrieving a submission.
///
/// Records the actor may not see are reported as not found.
pub struct GetSubmissionHandler {
    submissions: Arc<dyn SubmissionRepository>,
}

impl GetSubmissionHandler {
    pub fn new(submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { submissions }
    }

    pub async fn handle(
        &self,
        query: GetSubmissionQuery,
        metadata: CommandMetadata,
    ) -> Result<Submission, SubmissionError> {
        let id = query.submission_id;
        self.submissions
            .find_by_id(&id)
            .await?
            .filter(|s| s.is_visible_to(&metadata.user_id, metadata.role))
            .ok_or(SubmissionError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use super::*;

    #[tokio::test]
    async fn owner_sees_own_submission() {
        let fixture = Fixture::new().await;
        let stored = fixture.stored("cust-1", false).await;
        let handler = GetSubmissionHandler::new(fixture.submissions.clone());

        let found = handler
            .handle(GetSubmissionQuery { submission_id: stored.id }, customer("cust-1"))
            .await
            .unwrap();

        assert_eq!(found, stored);
    }

    #[tokio::test]
    async fn admin_sees_any_submission() {
        let fixture = Fixture::new().await;
        let stored = fixture.stored("cust-1", true).await;
        let handler = GetSubmissionHandler::new(fixture.submissions.clone());

        let found = handler
            .handle(GetSubmissionQuery { submission_id: stored.id }, admin())
            .await
            .unwrap();

        assert_eq!(found.id, stored.id);
    }

    #[tokio::test]
    async fn others_get_not_found() {
        let fixture = Fixture::new().await;
        let stored = fixture.stored("cust-1", false).await;
        let handler = GetSubmissionHandler::new(fixture.submissions.clone());

        for actor in [customer("cust-2"), reviewer("tpm-1")] {
            let err = handler
                .handle(GetSubmissionQuery { submission_id: stored.id }, actor)
                .await
                .unwrap_err();
            assert_eq!(err, SubmissionError::NotFound(stored.id));
        }
    }
}
