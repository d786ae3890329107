//! Authentication types for the domain layer.
//!
//! These types represent an authenticated actor extracted from a bearer
//! token. Any token issuer can populate them via the `SessionValidator` port.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{UserId, ValidationError};

/// Role of an actor, as asserted by the identity collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Tpm,
    Sales,
    Admin,
}

impl Role {
    /// Only admins publish schema versions.
    pub fn can_author_schemas(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Customers create, edit and submit their own forms.
    pub fn can_submit_forms(&self) -> bool {
        matches!(self, Role::Customer)
    }

    /// TPM and sales staff move submissions through review.
    pub fn can_review(&self) -> bool {
        matches!(self, Role::Tpm | Role::Sales)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Tpm => "tpm",
            Role::Sales => "sales",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "tpm" => Ok(Role::Tpm),
            "sales" => Ok(Role::Sales),
            "admin" => Ok(Role::Admin),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Authenticated actor extracted from a validated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The unique user identifier from the token subject.
    pub id: UserId,

    /// Role claim.
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn new(id: UserId, role: Role) -> Self {
        Self { id, role }
    }
}

/// Authentication errors that can occur during token validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The token is missing, malformed, or has an invalid signature.
    #[error("Invalid or expired token")]
    InvalidToken,

    /// The token has expired.
    #[error("Token expired")]
    TokenExpired,

    /// Token is valid but the role claim is not recognised.
    #[error("Unknown role: {0}")]
    UnknownRole(String),

    /// Actor is authenticated but lacks the role for this action.
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// The authentication backend could not be used.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if the caller should obtain a fresh token.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::UnknownRole(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_parses_case_insensitively() {
        assert_eq!("Customer".parse::<Role>().unwrap(), Role::Customer);
        assert_eq!("TPM".parse::<Role>().unwrap(), Role::Tpm);
        assert_eq!(" sales ".parse::<Role>().unwrap(), Role::Sales);
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("auditor".parse::<Role>().is_err());
    }

    #[test]
    fn role_permissions_follow_the_workflow() {
        assert!(Role::Admin.can_author_schemas());
        assert!(!Role::Customer.can_author_schemas());

        assert!(Role::Customer.can_submit_forms());
        assert!(!Role::Admin.can_submit_forms());

        assert!(Role::Tpm.can_review());
        assert!(Role::Sales.can_review());
        assert!(!Role::Customer.can_review());
        assert!(!Role::Admin.can_review());
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Tpm).unwrap(), "\"tpm\"");
        let role: Role = serde_json::from_str("\"sales\"").unwrap();
        assert_eq!(role, Role::Sales);
    }

    #[test]
    fn auth_error_requires_reauthentication_for_token_errors() {
        assert!(AuthError::InvalidToken.requires_reauthentication());
        assert!(AuthError::TokenExpired.requires_reauthentication());
        assert!(AuthError::UnknownRole("x".into()).requires_reauthentication());
        assert!(!AuthError::InsufficientPermissions.requires_reauthentication());
        assert!(!AuthError::service_unavailable("down").requires_reauthentication());
    }
}
