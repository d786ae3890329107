//! Submission domain module.
//!
//! - `aggregate` - Submission entity
//! - `status` - SubmissionStatus state machine
//! - `errors` - SubmissionError

mod aggregate;
mod errors;
mod status;

pub use aggregate::Submission;
pub use errors::SubmissionError;
pub use status::SubmissionStatus;
