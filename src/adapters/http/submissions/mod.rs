//! HTTP adapter for submissions.
//!
//! Endpoints:
//! - `POST /api/v1/submissions/:form_type` - Create (customer)
//! - `GET /api/v1/submissions` - List, scoped to the caller
//! - `GET /api/v1/submissions/:id` - Get one
//! - `PUT /api/v1/submissions/:id` - Update a draft (customer)
//! - `POST /api/v1/submissions/:id/submit` - Submit a draft (customer)
//! - `POST /api/v1/submissions/:id/review` - Review (tpm, sales)
//! - `GET /api/v1/submissions/:id/history` - Audit trail

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AuditEntryResponse, CreateSubmissionRequest, ListSubmissionsParams, ReviewRequest,
    ReviewResponse, SubmissionHistoryResponse, SubmissionListResponse, SubmissionResponse,
    UpdateDraftRequest,
};
pub use handlers::SubmissionHandlers;
pub use routes::submission_routes;
