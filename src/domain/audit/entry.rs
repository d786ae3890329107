//! Audit trail entries.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuditEntryId, SubmissionId, Timestamp, UserId};
use crate::domain::submission::SubmissionStatus;

/// Action label for a submission sent for review.
pub const ACTION_SUBMITTED: &str = "Submitted";

/// Action label for an edited draft.
pub const ACTION_UPDATED_DRAFT: &str = "Updated Draft";

/// One immutable record of an action taken on a submission.
///
/// Entries are only ever appended; nothing updates or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub submission_id: SubmissionId,
    pub actor_id: UserId,
    pub action: String,
    pub remarks: String,
    pub created_at: Timestamp,
}

impl AuditEntry {
    pub fn new(
        submission_id: SubmissionId,
        actor_id: UserId,
        action: impl Into<String>,
        remarks: impl Into<String>,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            submission_id,
            actor_id,
            action: action.into(),
            remarks: remarks.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Submission entered review, at creation or from a draft.
    pub fn submitted(submission_id: SubmissionId, actor_id: UserId, remarks: &str) -> Self {
        Self::new(submission_id, actor_id, ACTION_SUBMITTED, remarks)
    }

    pub fn draft_updated(submission_id: SubmissionId, actor_id: UserId) -> Self {
        Self::new(submission_id, actor_id, ACTION_UPDATED_DRAFT, "Draft updated")
    }

    /// A reviewer changed the status.
    pub fn status_changed(
        submission_id: SubmissionId,
        actor_id: UserId,
        status: SubmissionStatus,
        remarks: impl Into<String>,
    ) -> Self {
        Self::new(
            submission_id,
            actor_id,
            format!("Status changed to {}", status),
            remarks,
        )
    }
}
