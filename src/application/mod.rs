//! Application layer - Commands, Queries, and Handlers.
//!
//! Orchestrates domain operations over the ports. Command handlers change
//! state and write audit entries; query handlers only read.

pub mod handlers;
pub mod seed;

pub use handlers::{
    // Schema registry
    CreateFormSchemaCommand, CreateFormSchemaHandler,
    GetFormSchemaVersionHandler, GetFormSchemaVersionQuery,
    GetLatestFormSchemaHandler, GetLatestFormSchemaQuery,
    ListFormSchemaVersionsHandler, ListFormSchemaVersionsQuery,
    // Submissions
    CreateSubmissionCommand, CreateSubmissionHandler,
    GetSubmissionHandler, GetSubmissionQuery,
    GetSubmissionHistoryHandler, GetSubmissionHistoryQuery,
    ListSubmissionsHandler, ListSubmissionsQuery,
    ReviewSubmissionCommand, ReviewSubmissionHandler,
    SubmitDraftCommand, SubmitDraftHandler,
    UpdateDraftCommand, UpdateDraftHandler,
};
