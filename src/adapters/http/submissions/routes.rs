//! HTTP routes for submission endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_submission, get_submission, get_submission_history, list_submissions,
    review_submission, submit_draft, update_draft, SubmissionHandlers,
};

/// Creates the submission router.
///
/// The single-segment routes share one parameter: a form type for `POST`,
/// a submission id for `GET` and `PUT`.
pub fn submission_routes(handlers: SubmissionHandlers) -> Router {
    Router::new()
        .route("/", get(list_submissions))
        .route(
            "/:id",
            post(create_submission).get(get_submission).put(update_draft),
        )
        .route("/:id/submit", post(submit_draft))
        .route("/:id/review", post(review_submission))
        .route("/:id/history", get(get_submission_history))
        .with_state(handlers)
}
