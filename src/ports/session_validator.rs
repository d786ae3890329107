//! Session validation port for bearer tokens.
//!
//! Identity is external to the service. This port turns a raw token into
//! the actor id and role that every command carries. Implementations exist
//! for HS256 JWTs and for tests.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Validates access tokens and extracts the acting user.
///
/// # Contract
///
/// Implementations must:
/// - Validate the token signature and expiry
/// - Return `AuthError::InvalidToken` for malformed or badly signed tokens
/// - Return `AuthError::TokenExpired` for expired tokens
/// - Return `AuthError::UnknownRole` when the role claim is not recognised
#[async_trait]
pub trait SessionValidator: Send + Sync {
    /// Validate a token (without the "Bearer " prefix).
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Role, UserId};
    use std::collections::HashMap;

    struct FixedTokens(HashMap<String, AuthenticatedUser>);

    #[async_trait]
    impl SessionValidator for FixedTokens {
        async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
            self.0.get(token).cloned().ok_or(AuthError::InvalidToken)
        }
    }

    #[tokio::test]
    async fn validator_resolves_known_tokens_only() {
        let user = AuthenticatedUser::new(UserId::new("cust-1").unwrap(), Role::Customer);
        let validator = FixedTokens(HashMap::from([("good".to_string(), user.clone())]));

        assert_eq!(validator.validate("good").await.unwrap(), user);
        assert!(matches!(
            validator.validate("bad").await,
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn session_validator_is_object_safe() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SessionValidator>();
    }
}
