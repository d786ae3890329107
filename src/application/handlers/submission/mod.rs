//! Submission command and query handlers.

mod create_submission;
mod get_submission;
mod get_submission_history;
mod list_submissions;
mod review_submission;
mod submit_draft;
mod update_draft;

#[cfg(test)]
mod test_support;

pub use create_submission::{CreateSubmissionCommand, CreateSubmissionHandler};
pub use get_submission::{GetSubmissionHandler, GetSubmissionQuery};
pub use get_submission_history::{GetSubmissionHistoryHandler, GetSubmissionHistoryQuery};
pub use list_submissions::{build_filter, ListSubmissionsHandler, ListSubmissionsQuery};
pub use review_submission::{ReviewSubmissionCommand, ReviewSubmissionHandler};
pub use submit_draft::{SubmitDraftCommand, SubmitDraftHandler};
pub use update_draft::{UpdateDraftCommand, UpdateDraftHandler};
