//! HS256 JWT adapter for session validation.
//!
//! Tokens are signed with a shared secret and carry the acting user and
//! role:
//!
//! ```json
//! { "sub": "cust-42", "role": "customer", "exp": 1767225600 }
//! ```
//!
//! `user_id` is accepted in place of `sub`, as a string or a number.
//! `iss` is checked only when an issuer is configured.

use async_trait::async_trait;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::AuthConfig;
use crate::domain::foundation::{AuthError, AuthenticatedUser, Role, UserId};
use crate::ports::SessionValidator;

/// Claims carried by an onboarding session token.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionClaims {
    #[serde(alias = "user_id")]
    pub sub: Subject,

    pub role: String,

    /// Expiry (Unix epoch seconds)
    pub exp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Subject claim, issued either as text or as a numeric account id.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Subject {
    Text(String),
    Number(u64),
}

impl Subject {
    fn into_string(self) -> String {
        match self {
            Subject::Text(s) => s,
            Subject::Number(n) => n.to_string(),
        }
    }
}

/// Session validator for HS256-signed bearer tokens.
pub struct JwtSessionValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtSessionValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.validate_exp = true;
        match &config.issuer {
            Some(issuer) => {
                validation.set_issuer(&[issuer]);
                validation.set_required_spec_claims(&["exp", "iss"]);
            }
            None => validation.set_required_spec_claims(&["exp"]),
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.expose_secret().as_bytes()),
            validation,
        }
    }
}

#[async_trait]
impl SessionValidator for JwtSessionValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let data = decode::<SessionClaims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    tracing::debug!("Token expired");
                    AuthError::TokenExpired
                }
                ErrorKind::InvalidIssuer => {
                    tracing::warn!("Invalid issuer in token");
                    AuthError::InvalidToken
                }
                _ => {
                    tracing::debug!("Token validation failed: {}", e);
                    AuthError::InvalidToken
                }
            },
        )?;
        let claims = data.claims;

        let role: Role = claims.role.parse().map_err(|_| {
            tracing::warn!("Unknown role in token: {}", claims.role);
            AuthError::UnknownRole(claims.role.clone())
        })?;

        let user_id = UserId::new(claims.sub.into_string()).map_err(|_| {
            tracing::warn!("Token has a blank subject");
            AuthError::InvalidToken
        })?;

        Ok(AuthenticatedUser::new(user_id, role))
    }
}
