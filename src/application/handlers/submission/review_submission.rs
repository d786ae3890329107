//! ReviewSubmissionHandler - Command handler for reviewer status decisions.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, SubmissionId};
use crate::domain::submission::{Submission, SubmissionError, SubmissionStatus};
use crate::ports::SubmissionRepository;

#[derive(Debug, Clone)]
pub struct ReviewSubmissionCommand {
    pub submission_id: SubmissionId,
    pub status: SubmissionStatus,
    pub remarks: String,
}

/// Handler for review transitions.
///
/// The write is guarded by the revision read at load time. After a lost
/// race the decision is retried only if the status the reviewer acted on is
/// still current; otherwise the loser gets `InvalidTransition` from the
/// status the winner left behind.
pub struct ReviewSubmissionHandler {
    submissions: Arc<dyn SubmissionRepository>,
}

impl ReviewSubmissionHandler {
    pub fn new(submissions: Arc<dyn SubmissionRepository>) -> Self {
        Self { submissions }
    }

    pub async fn handle(
        &self,
        cmd: ReviewSubmissionCommand,
        metadata: CommandMetadata,
    ) -> Result<Submission, SubmissionError> {
        let observed = self.load(cmd.submission_id).await?;
        let seen = observed.status;

        match self.attempt(&cmd, &metadata, observed).await {
            Err(SubmissionError::Conflict(id)) => {
                let current = self.load(id).await?;
                if current.status != seen {
                    tracing::warn!(
                        submission_id = %id,
                        seen = %seen,
                        current = %current.status,
                        "Concurrent review won, rejecting stale decision"
                    );
                    return Err(SubmissionError::InvalidTransition {
                        from: current.status,
                        to: cmd.status,
                    });
                }
                tracing::warn!(submission_id = %id, "Concurrent write detected, retrying review");
                self.attempt(&cmd, &metadata, current).await
            }
            result => result,
        }
    }

    async fn load(&self, id: SubmissionId) -> Result<Submission, SubmissionError> {
        self.submissions
            .find_by_id(&id)
            .await?
            .ok_or(SubmissionError::NotFound(id))
    }

    async fn attempt(
        &self,
        cmd: &ReviewSubmissionCommand,
        metadata: &CommandMetadata,
        mut submission: Submission,
    ) -> Result<Submission, SubmissionError> {
        let id = submission.id;
        let from = submission.status;
        let expected = submission.revision;
        let entry = submission
            .review(&metadata.user_id, cmd.status, cmd.remarks.clone())
            .map_err(|e| {
                tracing::warn!(submission_id = %id, from = %from, to = %cmd.status, "Review rejected");
                e
            })?;

        self.submissions
            .update(&submission, expected, &[entry])
            .await
            .map_err(|e| SubmissionError::from_port(id, e))?;

        tracing::info!(
            submission_id = %id,
            from = %from,
            to = %submission.status,
            reviewer = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            "Submission reviewed"
        );

        Ok(submission)
    }
}
