//! Authentication middleware and extractors for axum.
//!
//! This module provides:
//! - `auth_middleware` - Layer that validates Bearer tokens and injects the user into extensions
//! - `RequireAuth` - Extractor that requires authentication and yields `CommandMetadata`
//!
//! The middleware uses the `SessionValidator` port, so the JWT validator
//! and the test mock are interchangeable.
//!
//! ```text
//! Request → auth_middleware → injects AuthenticatedUser into extensions
//!                                      ↓
//!                              Handler → RequireAuth reads it, then `permit` checks the role
//! ```

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::adapters::http::error::ErrorResponse;
use crate::domain::foundation::{AuthError, AuthenticatedUser, CommandMetadata, Role};
use crate::ports::SessionValidator;

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Header a caller may set to stitch its logs to ours.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Authentication middleware that validates Bearer tokens.
///
/// 1. Extracts the Bearer token from the Authorization header
/// 2. Validates the token using the `SessionValidator` port
/// 3. On success, injects `AuthenticatedUser` into request extensions
/// 4. On missing token, continues without injecting; `RequireAuth` rejects later
/// 5. On invalid token, returns 401 Unauthorized
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim);

    let Some(token) = token else {
        return next.run(request).await;
    };

    match validator.validate(token).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(e) => {
            let (status, message) = match &e {
                AuthError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
                AuthError::InvalidToken => (StatusCode::UNAUTHORIZED, "Invalid token"),
                AuthError::UnknownRole(role) => {
                    tracing::warn!(role = %role, "Token carries an unknown role");
                    (StatusCode::UNAUTHORIZED, "Unknown role")
                }
                AuthError::ServiceUnavailable(msg) => {
                    tracing::error!("Auth service unavailable: {}", msg);
                    (StatusCode::SERVICE_UNAVAILABLE, "Authentication service unavailable")
                }
                AuthError::InsufficientPermissions => {
                    (StatusCode::FORBIDDEN, "Insufficient permissions")
                }
            };

            ErrorResponse::new("AUTH_ERROR", message).into_response_with(status)
        }
    }
}

/// Extractor that requires authentication.
///
/// Yields the actor as `CommandMetadata`, correlated by the caller's
/// `x-request-id` header when present. Returns 401 when the middleware did
/// not authenticate the request.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CommandMetadata);

impl RequireAuth {
    /// Checks the actor's role, rejecting with 403 when `allowed` says no.
    pub fn permit(self, allowed: fn(&Role) -> bool) -> Result<CommandMetadata, AuthRejection> {
        if allowed(&self.0.role) {
            Ok(self.0)
        } else {
            tracing::warn!(
                user_id = %self.0.user_id,
                role = %self.0.role,
                "Role not permitted for this operation"
            );
            Err(AuthRejection::Forbidden(self.0.role))
        }
    }
}

fn metadata_from_parts(parts: &Parts) -> Option<CommandMetadata> {
    let user = parts.extensions.get::<AuthenticatedUser>()?.clone();
    let metadata = CommandMetadata::new(user.id, user.role);
    let request_id = parts
        .headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    Some(match request_id {
        Some(id) => metadata.with_correlation_id(id),
        None => metadata,
    })
}

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            metadata_from_parts(parts)
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication and role failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
    /// Authenticated, but the role may not perform the operation.
    Forbidden(Role),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => ErrorResponse::unauthorized("Authentication required")
                .into_response_with(StatusCode::UNAUTHORIZED),
            AuthRejection::Forbidden(role) => {
                ErrorResponse::forbidden(format!("Role {} may not perform this action", role))
                    .into_response_with(StatusCode::FORBIDDEN)
            }
        }
    }
}
