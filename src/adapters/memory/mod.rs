//! In-memory adapters for tests and local development.

mod audit_log;
mod schema_repository;
mod submission_repository;

pub use audit_log::InMemoryAuditLog;
pub use schema_repository::InMemorySchemaRepository;
pub use submission_repository::InMemorySubmissionRepository;
