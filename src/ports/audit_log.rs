//! Audit log port.
//!
//! Strictly additive: there is no update or delete. Entries for one
//! submission come back in the order they were appended.

use async_trait::async_trait;

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{DomainError, SubmissionId};

#[async_trait]
pub trait AuditLog: Send + Sync {
    /// Append one entry.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError>;

    /// Entries for a submission, oldest first.
    async fn history(&self, submission_id: &SubmissionId) -> Result<Vec<AuditEntry>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audit_log_is_object_safe() {
        fn _accepts_dyn(_log: &dyn AuditLog) {}
    }
}
