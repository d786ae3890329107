//! Command and query handlers, one per operation.

pub mod schema;
pub mod submission;

pub use schema::*;
pub use submission::*;
