//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Minimum HS256 key length accepted outside development.
pub const MIN_SECRET_LEN: usize = 32;

/// Authentication configuration (HS256 bearer tokens)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared signing key for session tokens
    pub jwt_secret: SecretString,

    /// Expected `iss` claim; unchecked when absent
    pub issuer: Option<String>,

    /// Clock skew tolerance for `exp` in seconds
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

impl AuthConfig {
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: SecretString::new(jwt_secret.into()),
            issuer: None,
            leeway_secs: default_leeway(),
        }
    }

    pub fn leeway(&self) -> Duration {
        Duration::from_secs(self.leeway_secs)
    }

    /// Validate authentication configuration
    ///
    /// Any non-empty key is accepted in development; other environments
    /// require at least [`MIN_SECRET_LEN`] bytes.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let secret = self.jwt_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if *environment != Environment::Development && secret.len() < MIN_SECRET_LEN {
            return Err(ValidationError::JwtSecretTooShort(MIN_SECRET_LEN));
        }
        if self.leeway_secs > 300 {
            return Err(ValidationError::LeewayTooLarge);
        }
        Ok(())
    }
}

fn default_leeway() -> u64 {
    30
}
