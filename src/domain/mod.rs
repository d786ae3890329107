//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, timestamps, errors, auth types)
//! - `schema` - Versioned form schemas and field definitions
//! - `validation` - Schema-driven payload validation and business rules
//! - `submission` - Submission aggregate and its lifecycle
//! - `audit` - Append-only audit entries

pub mod audit;
pub mod foundation;
pub mod schema;
pub mod submission;
pub mod validation;
