//! In-memory submission repository.
//!
//! Holds the submissions lock while it appends audit entries, so a write
//! either lands together with its audit trail or not at all.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{DomainError, ErrorCode, SubmissionId};
use crate::domain::submission::Submission;
use crate::ports::{SubmissionFilter, SubmissionRepository};

use super::InMemoryAuditLog;

#[derive(Debug, Clone)]
pub struct InMemorySubmissionRepository {
    submissions: Arc<RwLock<HashMap<SubmissionId, Submission>>>,
    audit: InMemoryAuditLog,
}

impl InMemorySubmissionRepository {
    /// Creates a repository that writes audit entries to `audit`.
    pub fn new(audit: InMemoryAuditLog) -> Self {
        Self {
            submissions: Arc::new(RwLock::new(HashMap::new())),
            audit,
        }
    }

    pub async fn count(&self) -> usize {
        self.submissions.read().await.len()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn insert(&self, submission: &Submission, audit: &[AuditEntry]) -> Result<(), DomainError> {
        let mut submissions = self.submissions.write().await;
        if submissions.contains_key(&submission.id) {
            return Err(DomainError::database(format!(
                "Failed to insert submission: duplicate id {}",
                submission.id
            )));
        }

        self.audit.append_all(audit).await?;
        submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    async fn update(
        &self,
        submission: &Submission,
        expected_revision: u32,
        audit: &[AuditEntry],
    ) -> Result<(), DomainError> {
        let mut submissions = self.submissions.write().await;
        let stored = submissions.get(&submission.id).ok_or_else(|| {
            DomainError::new(
                ErrorCode::SubmissionNotFound,
                format!("Submission not found: {}", submission.id),
            )
        })?;

        if stored.revision != expected_revision {
            return Err(DomainError::conflict(format!(
                "Submission {} is at revision {}, expected {}",
                submission.id, stored.revision, expected_revision
            )));
        }

        self.audit.append_all(audit).await?;
        submissions.insert(submission.id, submission.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        Ok(self.submissions.read().await.get(id).cloned())
    }

    async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, DomainError> {
        let submissions = self.submissions.read().await;
        let mut matching: Vec<&Submission> =
            submissions.values().filter(|s| filter.matches(s)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(matching
            .into_iter()
            .skip(filter.offset as usize)
            .take(filter.limit as usize)
            .cloned()
            .collect())
    }
}
