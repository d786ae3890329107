//! HTTP adapter for the schema registry.
//!
//! Endpoints:
//! - `POST /api/v1/forms/:form_type` - Publish the next schema version (admin)
//! - `GET /api/v1/forms/:form_type/versions` - Version history, newest first
//! - `GET /api/v1/forms/:form_type/versions/latest` - Current version
//! - `GET /api/v1/forms/:form_type/versions/:version` - One numbered version

mod dto;
mod handlers;
mod routes;

pub use dto::{CreateFormSchemaRequest, FormSchemaListResponse, FormSchemaResponse};
pub use handlers::FormHandlers;
pub use routes::form_routes;
