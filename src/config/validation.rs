//! Payload validation rules configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::validation::{SidRule, ValidationEngine, ZipCodeRule, DEFAULT_SID_PREFIX};

/// Business-rule settings applied by the validation engine
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Prefix of generated customer-order SIDs
    #[serde(default = "default_sid_prefix")]
    pub sid_prefix: String,

    /// How `address_zip_code` is checked
    #[serde(default)]
    pub zip_code_mode: ZipCodeRule,
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sid_prefix.is_empty() || self.sid_prefix.chars().any(char::is_whitespace) {
            return Err(ValidationError::InvalidSidPrefix);
        }
        Ok(())
    }

    /// Builds the engine these settings describe.
    pub fn engine(&self) -> ValidationEngine {
        ValidationEngine::new(self.zip_code_mode, SidRule::new(self.sid_prefix.clone()))
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            sid_prefix: default_sid_prefix(),
            zip_code_mode: ZipCodeRule::default(),
        }
    }
}

fn default_sid_prefix() -> String {
    DEFAULT_SID_PREFIX.to_string()
}
