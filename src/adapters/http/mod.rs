//! HTTP adapters - REST API over the application handlers.
//!
//! - `forms` - schema registry endpoints under `/api/v1/forms`
//! - `submissions` - submission workflow endpoints under `/api/v1/submissions`
//! - `middleware` - bearer-token authentication and role checks
//! - `error` - shared `{code, message}` error body and status mapping

pub mod error;
pub mod forms;
pub mod middleware;
pub mod submissions;

use std::sync::Arc;

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use http::{HeaderValue, Method};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;
use crate::domain::validation::ValidationEngine;
use crate::ports::{AuditLog, SchemaRepository, SessionValidator, SubmissionRepository};

pub use error::ErrorResponse;
pub use forms::{form_routes, FormHandlers};
pub use middleware::{auth_middleware, AuthRejection, AuthState, RequireAuth};
pub use submissions::{submission_routes, SubmissionHandlers};

/// Everything the API needs from the outside world.
#[derive(Clone)]
pub struct ApiDependencies {
    pub schemas: Arc<dyn SchemaRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub audit: Arc<dyn AuditLog>,
    pub engine: Arc<ValidationEngine>,
    pub validator: Arc<dyn SessionValidator>,
}

/// Builds the complete API router with authentication, tracing, CORS and
/// request timeout layers applied.
pub fn api_router(deps: ApiDependencies, server: &ServerConfig) -> Router {
    let forms = FormHandlers::from_repository(deps.schemas.clone());
    let submissions = SubmissionHandlers::from_stores(
        deps.schemas,
        deps.submissions,
        deps.audit,
        deps.engine,
    );

    Router::new()
        .nest("/api/v1/forms", form_routes(forms))
        .nest("/api/v1/submissions", submission_routes(submissions))
        .layer(from_fn_with_state(deps.validator, auth_middleware))
        .route("/health", get(health))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(server))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Any origin when none are configured, otherwise exactly the configured list.
fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers(Any);

    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(origins)
    }
}
