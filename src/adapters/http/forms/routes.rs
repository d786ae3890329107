//! HTTP routes for form schema endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_form_schema, get_form_schema_version, get_latest_form_schema,
    list_form_schema_versions, FormHandlers,
};

/// Creates the form schema router.
///
/// `versions/latest` is a static segment and wins over `versions/:version`.
pub fn form_routes(handlers: FormHandlers) -> Router {
    Router::new()
        .route("/:form_type", post(create_form_schema))
        .route("/:form_type/versions", get(list_form_schema_versions))
        .route("/:form_type/versions/latest", get(get_latest_form_schema))
        .route("/:form_type/versions/:version", get(get_form_schema_version))
        .with_state(handlers)
}
