//! HTTP handlers for submission endpoints.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{
    handle_json_rejection, handle_query_rejection, handle_schema_error, handle_submission_error,
    ErrorResponse,
};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::submission::{
    CreateSubmissionCommand, CreateSubmissionHandler, GetSubmissionHandler,
    GetSubmissionHistoryHandler, GetSubmissionHistoryQuery, GetSubmissionQuery,
    ListSubmissionsHandler, ReviewSubmissionCommand, ReviewSubmissionHandler, SubmitDraftCommand,
    SubmitDraftHandler, UpdateDraftCommand, UpdateDraftHandler,
};
use crate::domain::foundation::{Role, SubmissionId};
use crate::domain::schema::FormType;
use crate::domain::submission::SubmissionStatus;
use crate::domain::validation::ValidationEngine;
use crate::ports::{AuditLog, SchemaRepository, SubmissionRepository};

use super::dto::{
    AuditEntryResponse, CreateSubmissionRequest, ListSubmissionsParams, ReviewRequest,
    ReviewResponse, SubmissionHistoryResponse, SubmissionListResponse, SubmissionResponse,
    UpdateDraftRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct SubmissionHandlers {
    create_handler: Arc<CreateSubmissionHandler>,
    update_handler: Arc<UpdateDraftHandler>,
    submit_handler: Arc<SubmitDraftHandler>,
    review_handler: Arc<ReviewSubmissionHandler>,
    get_handler: Arc<GetSubmissionHandler>,
    history_handler: Arc<GetSubmissionHistoryHandler>,
    list_handler: Arc<ListSubmissionsHandler>,
}

impl SubmissionHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        create_handler: Arc<CreateSubmissionHandler>,
        update_handler: Arc<UpdateDraftHandler>,
        submit_handler: Arc<SubmitDraftHandler>,
        review_handler: Arc<ReviewSubmissionHandler>,
        get_handler: Arc<GetSubmissionHandler>,
        history_handler: Arc<GetSubmissionHistoryHandler>,
        list_handler: Arc<ListSubmissionsHandler>,
    ) -> Self {
        Self {
            create_handler,
            update_handler,
            submit_handler,
            review_handler,
            get_handler,
            history_handler,
            list_handler,
        }
    }

    /// Wires every submission handler to the given stores.
    pub fn from_stores(
        schemas: Arc<dyn SchemaRepository>,
        submissions: Arc<dyn SubmissionRepository>,
        audit: Arc<dyn AuditLog>,
        engine: Arc<ValidationEngine>,
    ) -> Self {
        Self::new(
            Arc::new(CreateSubmissionHandler::new(
                schemas.clone(),
                submissions.clone(),
                engine.clone(),
            )),
            Arc::new(UpdateDraftHandler::new(
                schemas.clone(),
                submissions.clone(),
                engine.clone(),
            )),
            Arc::new(SubmitDraftHandler::new(schemas, submissions.clone(), engine)),
            Arc::new(ReviewSubmissionHandler::new(submissions.clone())),
            Arc::new(GetSubmissionHandler::new(submissions.clone())),
            Arc::new(GetSubmissionHistoryHandler::new(submissions.clone(), audit)),
            Arc::new(ListSubmissionsHandler::new(submissions)),
        )
    }
}

fn parse_submission_id(raw: &str) -> Result<SubmissionId, Response> {
    raw.parse::<SubmissionId>().map_err(|_| {
        ErrorResponse::bad_request(format!("invalid submission id: {}", raw))
            .into_response_with(StatusCode::BAD_REQUEST)
    })
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/submissions/:form_type - Create a draft or submit directly (customer)
pub async fn create_submission(
    State(handlers): State<SubmissionHandlers>,
    auth: RequireAuth,
    Path(form_type): Path<String>,
    payload: Result<Json<CreateSubmissionRequest>, JsonRejection>,
) -> Response {
    let metadata = match auth.permit(Role::can_submit_forms) {
        Ok(metadata) => metadata,
        Err(rejection) => return rejection.into_response(),
    };
    let form_type = match form_type.parse::<FormType>() {
        Ok(form_type) => form_type,
        Err(e) => return handle_schema_error(e),
    };
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return handle_json_rejection(rejection),
    };

    let cmd = CreateSubmissionCommand {
        form_type,
        data: req.data,
        is_draft: req.is_draft,
    };

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(submission) => {
            (StatusCode::CREATED, Json(SubmissionResponse::from(submission))).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}

/// GET /api/v1/submissions - Role-scoped, filtered listing
pub async fn list_submissions(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(metadata): RequireAuth,
    params: Result<Query<ListSubmissionsParams>, QueryRejection>,
) -> Response {
    let Query(params) = match params {
        Ok(params) => params,
        Err(rejection) => return handle_query_rejection(rejection),
    };

    match handlers.list_handler.handle(params.into(), metadata).await {
        Ok(submissions) => {
            (StatusCode::OK, Json(SubmissionListResponse::from(submissions))).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}

/// GET /api/v1/submissions/:id - One visible submission
pub async fn get_submission(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(metadata): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let submission_id = match parse_submission_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .get_handler
        .handle(GetSubmissionQuery { submission_id }, metadata)
        .await
    {
        Ok(submission) => {
            (StatusCode::OK, Json(SubmissionResponse::from(submission))).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}

/// PUT /api/v1/submissions/:id - Replace a draft's data (customer, owner)
pub async fn update_draft(
    State(handlers): State<SubmissionHandlers>,
    auth: RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<UpdateDraftRequest>, JsonRejection>,
) -> Response {
    let metadata = match auth.permit(Role::can_submit_forms) {
        Ok(metadata) => metadata,
        Err(rejection) => return rejection.into_response(),
    };
    let submission_id = match parse_submission_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return handle_json_rejection(rejection),
    };

    let cmd = UpdateDraftCommand {
        submission_id,
        data: req.data,
    };

    match handlers.update_handler.handle(cmd, metadata).await {
        Ok(submission) => {
            (StatusCode::OK, Json(SubmissionResponse::from(submission))).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}

/// POST /api/v1/submissions/:id/submit - Move an own draft to Submitted (customer)
pub async fn submit_draft(
    State(handlers): State<SubmissionHandlers>,
    auth: RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let metadata = match auth.permit(Role::can_submit_forms) {
        Ok(metadata) => metadata,
        Err(rejection) => return rejection.into_response(),
    };
    let submission_id = match parse_submission_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .submit_handler
        .handle(SubmitDraftCommand { submission_id }, metadata)
        .await
    {
        Ok(submission) => {
            (StatusCode::OK, Json(SubmissionResponse::from(submission))).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}

/// POST /api/v1/submissions/:id/review - Apply a review transition (tpm, sales)
pub async fn review_submission(
    State(handlers): State<SubmissionHandlers>,
    auth: RequireAuth,
    Path(id): Path<String>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> Response {
    let metadata = match auth.permit(Role::can_review) {
        Ok(metadata) => metadata,
        Err(rejection) => return rejection.into_response(),
    };
    let submission_id = match parse_submission_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let Json(req) = match payload {
        Ok(body) => body,
        Err(rejection) => return handle_json_rejection(rejection),
    };
    let status = match req.status.parse::<SubmissionStatus>() {
        Ok(status) => status,
        Err(e) => {
            return ErrorResponse::bad_request(e.to_string())
                .into_response_with(StatusCode::BAD_REQUEST)
        }
    };

    let cmd = ReviewSubmissionCommand {
        submission_id,
        status,
        remarks: req.remarks,
    };

    match handlers.review_handler.handle(cmd, metadata).await {
        Ok(submission) => {
            let response = ReviewResponse {
                message: "review completed".to_string(),
                submission: SubmissionResponse::from(submission),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}

/// GET /api/v1/submissions/:id/history - Audit trail of a visible submission
pub async fn get_submission_history(
    State(handlers): State<SubmissionHandlers>,
    RequireAuth(metadata): RequireAuth,
    Path(id): Path<String>,
) -> Response {
    let submission_id = match parse_submission_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .history_handler
        .handle(GetSubmissionHistoryQuery { submission_id }, metadata)
        .await
    {
        Ok(entries) => {
            let response = SubmissionHistoryResponse {
                submission_id: submission_id.to_string(),
                entries: entries.into_iter().map(AuditEntryResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_submission_error(e),
    }
}
