//! Foundation module - Shared domain primitives.
//!
//! Identifiers, timestamps, error types and the small set of traits
//! that the onboarding aggregates share.

mod auth;
mod command;
mod errors;
mod ids;
mod ownership;
mod state_machine;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser, Role};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AuditEntryId, SubmissionId, UserId};
pub use ownership::OwnedByUser;
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
