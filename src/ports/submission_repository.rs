//! Submission repository port.
//!
//! Writes carry the audit entries that belong to them; implementations
//! persist both in one atomic unit so that a status never advances without
//! its audit record.

use async_trait::async_trait;

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{DomainError, SubmissionId, Timestamp, UserId};
use crate::domain::submission::{Submission, SubmissionStatus};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 10;

/// Largest page a caller may request.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Criteria for listing submissions, newest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionFilter {
    /// Restrict to one owner. `None` lists everyone's records.
    pub owner_id: Option<UserId>,
    pub status: Option<SubmissionStatus>,
    /// Inclusive lower bound on `created_at`.
    pub created_from: Option<Timestamp>,
    /// Inclusive upper bound on `created_at`.
    pub created_to: Option<Timestamp>,
    pub limit: u32,
    pub offset: u32,
}

impl Default for SubmissionFilter {
    fn default() -> Self {
        Self {
            owner_id: None,
            status: None,
            created_from: None,
            created_to: None,
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl SubmissionFilter {
    /// Returns true if the submission satisfies every criterion except paging.
    pub fn matches(&self, submission: &Submission) -> bool {
        if let Some(owner) = &self.owner_id {
            if &submission.owner_id != owner {
                return false;
            }
        }
        if let Some(status) = self.status {
            if submission.status != status {
                return false;
            }
        }
        if let Some(from) = &self.created_from {
            if submission.created_at.is_before(from) {
                return false;
            }
        }
        if let Some(to) = &self.created_to {
            if submission.created_at.is_after(to) {
                return false;
            }
        }
        true
    }
}

/// Repository port for Submission persistence.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    /// Insert a new submission together with its audit entries.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, submission: &Submission, audit: &[AuditEntry]) -> Result<(), DomainError>;

    /// Persist a changed submission if its stored revision is still
    /// `expected_revision`, appending `audit` in the same unit.
    ///
    /// # Errors
    ///
    /// - `SubmissionNotFound` if the submission doesn't exist
    /// - `ConcurrencyConflict` if another writer got there first
    /// - `DatabaseError` on persistence failure
    async fn update(
        &self,
        submission: &Submission,
        expected_revision: u32,
        audit: &[AuditEntry],
    ) -> Result<(), DomainError>;

    /// Find a submission by its ID.
    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError>;

    /// Submissions matching the filter, newest first, one page.
    async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, DomainError>;
}
