//! Business rules layered on top of schema-driven field checks.
//!
//! Both rules run after every declared field passed, regardless of whether
//! the schema declares the field they look at.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::domain::schema::FormType;

use super::{FieldError, Payload};

/// Payload key checked by the zip-code rule.
pub const ZIP_CODE_FIELD: &str = "address_zip_code";

/// Payload key holding the synthetic submission identifier.
pub const SID_FIELD: &str = "sid";

/// Default prefix for generated `sid` values.
pub const DEFAULT_SID_PREFIX: &str = "HSN-";

/// How `address_zip_code` is checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZipCodeRule {
    /// Value must be non-empty and made only of ASCII digits.
    #[default]
    DigitsOnly,

    /// Value must contain the literal "0123456789" somewhere, or it is
    /// rejected. Kept for deployments that depend on the historical check.
    LegacySubstring,
}

impl ZipCodeRule {
    /// Checks the zip code if present. Non-string values are not checked.
    pub fn check(&self, payload: &Payload) -> Result<(), FieldError> {
        let Some(Value::String(zip)) = payload.get(ZIP_CODE_FIELD) else {
            return Ok(());
        };

        let accepted = match self {
            ZipCodeRule::DigitsOnly => !zip.is_empty() && zip.chars().all(|c| c.is_ascii_digit()),
            ZipCodeRule::LegacySubstring => zip.contains("0123456789"),
        };

        if accepted {
            Ok(())
        } else {
            Err(FieldError::NotNumeric {
                field: ZIP_CODE_FIELD.to_string(),
            })
        }
    }
}

/// Assigns a synthetic identifier to forms that carry one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidRule {
    prefix: String,
}

impl SidRule {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Prefix followed by eight uppercase hex characters of a fresh UUID.
    pub fn generate(&self) -> String {
        let hex = Uuid::new_v4().simple().to_string();
        format!("{}{}", self.prefix, hex[..8].to_uppercase())
    }

    /// Inserts a `sid` when the form type uses one and none is set.
    ///
    /// An explicit JSON null counts as unset. An existing value is kept.
    pub fn apply(&self, form_type: FormType, payload: &mut Payload) {
        if !form_type.assigns_sid() {
            return;
        }
        let missing = matches!(payload.get(SID_FIELD), None | Some(Value::Null));
        if missing {
            payload.insert(SID_FIELD.to_string(), Value::String(self.generate()));
        }
    }
}

impl Default for SidRule {
    fn default() -> Self {
        Self::new(DEFAULT_SID_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn digits_only_accepts_numeric_zip() {
        let rule = ZipCodeRule::DigitsOnly;
        assert!(rule.check(&payload(json!({ "address_zip_code": "560001" }))).is_ok());
    }

    #[test]
    fn digits_only_rejects_letters_and_empty() {
        let rule = ZipCodeRule::DigitsOnly;
        for zip in ["56A001", "", "56 001", "５６０"] {
            let err = rule
                .check(&payload(json!({ "address_zip_code": zip })))
                .unwrap_err();
            assert_eq!(err.to_string(), "address_zip_code must be numeric");
        }
    }

    #[test]
    fn legacy_mode_requires_the_digit_run() {
        let rule = ZipCodeRule::LegacySubstring;
        assert!(rule.check(&payload(json!({ "address_zip_code": "560001" }))).is_err());
        assert!(rule
            .check(&payload(json!({ "address_zip_code": "x0123456789" })))
            .is_ok());
    }

    #[test]
    fn zip_rule_ignores_absent_and_non_string_values() {
        let rule = ZipCodeRule::DigitsOnly;
        assert!(rule.check(&payload(json!({}))).is_ok());
        assert!(rule.check(&payload(json!({ "address_zip_code": 560001 }))).is_ok());
    }

    #[test]
    fn zip_rule_deserializes_from_config_names() {
        let rule: ZipCodeRule = serde_json::from_value(json!("legacy_substring")).unwrap();
        assert_eq!(rule, ZipCodeRule::LegacySubstring);
        assert_eq!(ZipCodeRule::default(), ZipCodeRule::DigitsOnly);
    }

    #[test]
    fn generated_sid_has_prefix_and_eight_uppercase_hex() {
        let sid = SidRule::default().generate();
        let suffix = sid.strip_prefix("HSN-").unwrap();

        assert_eq!(suffix.len(), 8);
        assert!(suffix
            .chars()
            .all(|c| c.is_ascii_digit() || ('A'..='F').contains(&c)));
    }

    #[test]
    fn apply_inserts_sid_for_customer_order_only() {
        let rule = SidRule::new("ORD-");

        let mut order = payload(json!({ "brand_name": "Acme" }));
        rule.apply(FormType::CustomerOrder, &mut order);
        assert!(order["sid"].as_str().unwrap().starts_with("ORD-"));

        let mut qualification = payload(json!({ "organization_name": "Acme" }));
        rule.apply(FormType::Qualification, &mut qualification);
        assert!(!qualification.contains_key("sid"));
    }

    #[test]
    fn apply_never_overwrites_an_existing_sid() {
        let rule = SidRule::default();
        let mut order = payload(json!({ "sid": "HSN-CAFEBABE" }));
        rule.apply(FormType::CustomerOrder, &mut order);
        assert_eq!(order["sid"], "HSN-CAFEBABE");
    }

    #[test]
    fn apply_replaces_null_sid() {
        let rule = SidRule::default();
        let mut order = payload(json!({ "sid": null }));
        rule.apply(FormType::CustomerOrder, &mut order);
        assert!(order["sid"].is_string());
    }
}
