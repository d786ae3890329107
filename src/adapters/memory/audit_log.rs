//! In-memory audit log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{DomainError, SubmissionId};
use crate::ports::AuditLog;

/// Audit log held in a vector, in append order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAuditLog {
    entries: Arc<RwLock<Vec<AuditEntry>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryAuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent append fail, to exercise rollback paths.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Appends all entries or none of them.
    pub(crate) async fn append_all(&self, entries: &[AuditEntry]) -> Result<(), DomainError> {
        if entries.is_empty() {
            return Ok(());
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::database("Failed to append audit entry: log unavailable"));
        }
        self.entries.write().await.extend_from_slice(entries);
        Ok(())
    }
}

#[async_trait]
impl AuditLog for InMemoryAuditLog {
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        self.append_all(std::slice::from_ref(entry)).await
    }

    async fn history(&self, submission_id: &SubmissionId) -> Result<Vec<AuditEntry>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .iter()
            .filter(|e| &e.submission_id == submission_id)
            .cloned()
            .collect())
    }
}
