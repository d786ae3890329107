//! Submission aggregate entity.
//!
//! A submission is form data validated against one pinned schema version.
//! Payload edits are only possible while it is a draft; status edits go
//! through the review table. Every mutation returns the audit entry that
//! must be persisted with it.

use serde::{Deserialize, Serialize};

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{
    OwnedByUser, Role, StateMachine, SubmissionId, Timestamp, UserId,
};
use crate::domain::schema::FormType;
use crate::domain::validation::Payload;

use super::{SubmissionError, SubmissionStatus};

/// Submission aggregate.
///
/// # Invariants
///
/// - `form_type` and `schema_version` never change after creation
/// - `data` satisfies the schema at `schema_version`
/// - `revision` increases by one with every persisted change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub form_type: FormType,
    pub schema_version: u32,
    pub owner_id: UserId,
    pub data: Payload,
    pub status: SubmissionStatus,
    pub revision: u32,
    pub created_by: UserId,
    pub updated_by: UserId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Submission {
    /// Creates a submission from an already-validated payload.
    pub fn create(
        form_type: FormType,
        schema_version: u32,
        owner_id: UserId,
        data: Payload,
        is_draft: bool,
    ) -> Self {
        let now = Timestamp::now();
        let status = if is_draft {
            SubmissionStatus::Draft
        } else {
            SubmissionStatus::Submitted
        };
        Self {
            id: SubmissionId::new(),
            form_type,
            schema_version,
            created_by: owner_id.clone(),
            updated_by: owner_id.clone(),
            owner_id,
            data,
            status,
            revision: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Audit entries that must accompany the initial insert.
    pub fn creation_audit(&self) -> Vec<AuditEntry> {
        if self.status == SubmissionStatus::Submitted {
            vec![AuditEntry::submitted(
                self.id,
                self.owner_id.clone(),
                "Initial submission",
            )]
        } else {
            Vec::new()
        }
    }

    /// Fails with `NotEditable` unless `actor` owns this draft.
    pub fn ensure_editable_by(&self, actor: &UserId) -> Result<(), SubmissionError> {
        if self.is_owner(actor) && self.status.is_draft() {
            Ok(())
        } else {
            Err(SubmissionError::NotEditable(self.id))
        }
    }

    /// Replaces the draft payload with a revalidated one.
    pub fn edit_draft(&mut self, actor: &UserId, data: Payload) -> Result<AuditEntry, SubmissionError> {
        self.ensure_editable_by(actor)?;
        self.data = data;
        self.touch(actor);
        Ok(AuditEntry::draft_updated(self.id, actor.clone()))
    }

    /// Sends an owner's draft for review.
    pub fn submit(&mut self, actor: &UserId) -> Result<AuditEntry, SubmissionError> {
        self.ensure_editable_by(actor)?;
        self.status = self.advance(SubmissionStatus::Submitted)?;
        self.touch(actor);
        Ok(AuditEntry::submitted(self.id, actor.clone(), "Draft submitted"))
    }

    /// Applies a reviewer's decision if the review table allows it.
    pub fn review(
        &mut self,
        actor: &UserId,
        new_status: SubmissionStatus,
        remarks: impl Into<String>,
    ) -> Result<AuditEntry, SubmissionError> {
        if !self.status.can_review_to(&new_status) {
            return Err(SubmissionError::InvalidTransition {
                from: self.status,
                to: new_status,
            });
        }
        self.status = self.advance(new_status)?;
        self.touch(actor);
        Ok(AuditEntry::status_changed(
            self.id,
            actor.clone(),
            new_status,
            remarks,
        ))
    }

    /// Admins see every submission; everyone else only their own.
    pub fn is_visible_to(&self, actor: &UserId, role: Role) -> bool {
        role == Role::Admin || self.is_owner(actor)
    }

    fn advance(&self, target: SubmissionStatus) -> Result<SubmissionStatus, SubmissionError> {
        self.status
            .transition_to(target)
            .map_err(|_| SubmissionError::InvalidTransition {
                from: self.status,
                to: target,
            })
    }

    fn touch(&mut self, actor: &UserId) {
        self.updated_by = actor.clone();
        self.updated_at = Timestamp::now();
        self.revision += 1;
    }
}

impl OwnedByUser for Submission {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}
