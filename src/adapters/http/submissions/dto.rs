//! HTTP DTOs for submission endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::submission::ListSubmissionsQuery;
use crate::domain::audit::AuditEntry;
use crate::domain::submission::{Submission, SubmissionStatus};
use crate::domain::validation::Payload;

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a submission against the latest schema.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSubmissionRequest {
    #[serde(default)]
    pub data: Payload,
    #[serde(default)]
    pub is_draft: bool,
}

/// Request to replace a draft's data.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateDraftRequest {
    #[serde(default)]
    pub data: Payload,
}

/// Request to move a submission to a review status.
#[derive(Debug, Clone, Deserialize)]
pub struct ReviewRequest {
    pub status: String,
    #[serde(default)]
    pub remarks: String,
}

/// Query parameters for listing submissions.
///
/// Kept as strings so malformed values are reported by the listing rules
/// with a field-specific message.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListSubmissionsParams {
    pub customer_id: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl From<ListSubmissionsParams> for ListSubmissionsQuery {
    fn from(params: ListSubmissionsParams) -> Self {
        Self {
            customer_id: params.customer_id,
            status: params.status,
            start_date: params.start_date,
            end_date: params.end_date,
            limit: params.limit,
            offset: params.offset,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Submission as returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub form_type: String,
    pub schema_version: u32,
    pub owner_id: String,
    pub data: Payload,
    pub status: SubmissionStatus,
    pub revision: u32,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Submission> for SubmissionResponse {
    fn from(submission: Submission) -> Self {
        Self {
            id: submission.id.to_string(),
            form_type: submission.form_type.as_str().to_string(),
            schema_version: submission.schema_version,
            owner_id: submission.owner_id.to_string(),
            data: submission.data,
            status: submission.status,
            revision: submission.revision,
            created_by: submission.created_by.to_string(),
            updated_by: submission.updated_by.to_string(),
            created_at: submission.created_at.as_datetime().to_rfc3339(),
            updated_at: submission.updated_at.as_datetime().to_rfc3339(),
        }
    }
}

/// One page of submissions, newest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionListResponse {
    pub submissions: Vec<SubmissionResponse>,
    pub count: usize,
}

impl From<Vec<Submission>> for SubmissionListResponse {
    fn from(submissions: Vec<Submission>) -> Self {
        let submissions: Vec<SubmissionResponse> =
            submissions.into_iter().map(SubmissionResponse::from).collect();
        Self {
            count: submissions.len(),
            submissions,
        }
    }
}

/// Response for a completed review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub message: String,
    pub submission: SubmissionResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    pub remarks: String,
    pub created_at: String,
}

impl From<AuditEntry> for AuditEntryResponse {
    fn from(entry: AuditEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            actor_id: entry.actor_id.to_string(),
            action: entry.action,
            remarks: entry.remarks,
            created_at: entry.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Audit trail of one submission in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionHistoryResponse {
    pub submission_id: String,
    pub entries: Vec<AuditEntryResponse>,
}
