//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SchemaRepository` - Versioned schema storage
//! - `SubmissionRepository` - Submission storage with atomic audit writes
//! - `AuditLog` - Append-only audit trail
//! - `SessionValidator` - Bearer token validation

mod audit_log;
mod schema_repository;
mod session_validator;
mod submission_repository;

pub use audit_log::AuditLog;
pub use schema_repository::SchemaRepository;
pub use session_validator::SessionValidator;
pub use submission_repository::{
    SubmissionFilter, SubmissionRepository, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT,
};
