//! HTTP handlers for form schema endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{handle_json_rejection, handle_schema_error, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::schema::{
    CreateFormSchemaCommand, CreateFormSchemaHandler, GetFormSchemaVersionHandler,
    GetFormSchemaVersionQuery, GetLatestFormSchemaHandler, GetLatestFormSchemaQuery,
    ListFormSchemaVersionsHandler, ListFormSchemaVersionsQuery,
};
use crate::domain::foundation::Role;
use crate::domain::schema::{FormType, SchemaError};
use crate::ports::SchemaRepository;

use super::dto::{CreateFormSchemaRequest, FormSchemaListResponse, FormSchemaResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct FormHandlers {
    create_handler: Arc<CreateFormSchemaHandler>,
    latest_handler: Arc<GetLatestFormSchemaHandler>,
    version_handler: Arc<GetFormSchemaVersionHandler>,
    list_handler: Arc<ListFormSchemaVersionsHandler>,
}

impl FormHandlers {
    pub fn new(
        create_handler: Arc<CreateFormSchemaHandler>,
        latest_handler: Arc<GetLatestFormSchemaHandler>,
        version_handler: Arc<GetFormSchemaVersionHandler>,
        list_handler: Arc<ListFormSchemaVersionsHandler>,
    ) -> Self {
        Self {
            create_handler,
            latest_handler,
            version_handler,
            list_handler,
        }
    }

    /// Wires every schema handler to one repository.
    pub fn from_repository(repository: Arc<dyn SchemaRepository>) -> Self {
        Self::new(
            Arc::new(CreateFormSchemaHandler::new(repository.clone())),
            Arc::new(GetLatestFormSchemaHandler::new(repository.clone())),
            Arc::new(GetFormSchemaVersionHandler::new(repository.clone())),
            Arc::new(ListFormSchemaVersionsHandler::new(repository)),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/v1/forms/:form_type - Publish the next schema version (admin)
pub async fn create_form_schema(
    State(handlers): State<FormHandlers>,
    auth: RequireAuth,
    Path(form_type): Path<String>,
    payload: Result<Json<CreateFormSchemaRequest>, JsonRejection>,
) -> Response {
    let metadata = match auth.permit(Role::can_author_schemas) {
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
    if req.schema.is_empty() {
        return ErrorResponse::bad_request(SchemaError::EmptySchema.to_string())
            .into_response_with(StatusCode::BAD_REQUEST);
    }

    let cmd = CreateFormSchemaCommand {
        form_type,
        fields: req.schema,
    };

    match handlers.create_handler.handle(cmd, metadata).await {
        Ok(schema) => {
            (StatusCode::CREATED, Json(FormSchemaResponse::from(&schema))).into_response()
        }
        Err(e) => handle_schema_error(e),
    }
}

/// GET /api/v1/forms/:form_type/versions - Version history, newest first
pub async fn list_form_schema_versions(
    State(handlers): State<FormHandlers>,
    RequireAuth(_metadata): RequireAuth,
    Path(form_type): Path<String>,
) -> Response {
    let form_type = match form_type.parse::<FormType>() {
        Ok(form_type) => form_type,
        Err(e) => return handle_schema_error(e),
    };

    match handlers
        .list_handler
        .handle(ListFormSchemaVersionsQuery { form_type })
        .await
    {
        Ok(schemas) => {
            let response = FormSchemaListResponse {
                form_type: form_type.as_str().to_string(),
                versions: schemas.iter().map(FormSchemaResponse::from).collect(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_schema_error(e),
    }
}

/// GET /api/v1/forms/:form_type/versions/latest - Current schema version
pub async fn get_latest_form_schema(
    State(handlers): State<FormHandlers>,
    RequireAuth(_metadata): RequireAuth,
    Path(form_type): Path<String>,
) -> Response {
    let form_type = match form_type.parse::<FormType>() {
        Ok(form_type) => form_type,
        Err(e) => return handle_schema_error(e),
    };

    match handlers
        .latest_handler
        .handle(GetLatestFormSchemaQuery { form_type })
        .await
    {
        Ok(schema) => (StatusCode::OK, Json(FormSchemaResponse::from(&schema))).into_response(),
        Err(e) => handle_schema_error(e),
    }
}

/// GET /api/v1/forms/:form_type/versions/:version - One numbered version
pub async fn get_form_schema_version(
    State(handlers): State<FormHandlers>,
    RequireAuth(_metadata): RequireAuth,
    Path((form_type, version)): Path<(String, String)>,
) -> Response {
    let form_type = match form_type.parse::<FormType>() {
        Ok(form_type) => form_type,
        Err(e) => return handle_schema_error(e),
    };
    let version = match version.parse::<u32>() {
        Ok(version) if version > 0 => version,
        _ => return handle_schema_error(SchemaError::InvalidVersion),
    };

    match handlers
        .version_handler
        .handle(GetFormSchemaVersionQuery { form_type, version })
        .await
    {
        Ok(schema) => (StatusCode::OK, Json(FormSchemaResponse::from(&schema))).into_response(),
        Err(e) => handle_schema_error(e),
    }
}
