//! Append-only audit trail for submissions.

mod entry;

pub use entry::{AuditEntry, ACTION_SUBMITTED, ACTION_UPDATED_DRAFT};
