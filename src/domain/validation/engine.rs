//! Schema-driven payload validation.
//!
//! `ValidationEngine::validate` walks the schema's fields in declaration
//! order and stops at the first violation. When every field passes, the
//! zip-code rule and the `sid` rule run. The caller's payload is never
//! mutated; the result is a fresh map holding the original values plus any
//! synthesized keys. Keys the schema does not declare pass through.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Number, Value};
use url::Url;

use crate::domain::schema::{FieldDefinition, FieldKind, FormSchema};

use super::rules::{SidRule, ZipCodeRule, SID_FIELD};
use super::FieldError;

/// Untyped submission data keyed by field name.
pub type Payload = serde_json::Map<String, Value>;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,4}$").expect("email pattern is valid")
});

// Root-relative references are resolved against this to check their syntax.
static RELATIVE_BASE: Lazy<Url> =
    Lazy::new(|| Url::parse("http://relative.invalid/").expect("base url is valid"));

/// Validates payloads against form schemas.
#[derive(Debug, Clone, Default)]
pub struct ValidationEngine {
    zip_rule: ZipCodeRule,
    sid_rule: SidRule,
}

impl ValidationEngine {
    pub fn new(zip_rule: ZipCodeRule, sid_rule: SidRule) -> Self {
        Self { zip_rule, sid_rule }
    }

    /// Validates a first-time payload and returns the normalized copy.
    pub fn validate(&self, schema: &FormSchema, raw: &Payload) -> Result<Payload, FieldError> {
        for field in schema.fields() {
            match raw.get(&field.name) {
                Some(value) => check_field(field, value)?,
                None if field.required => {
                    return Err(FieldError::Required {
                        field: field.name.clone(),
                    })
                }
                None => {}
            }
        }

        self.zip_rule.check(raw)?;

        let mut normalized = raw.clone();
        self.sid_rule.apply(schema.form_type, &mut normalized);
        Ok(normalized)
    }

    /// Validates a replacement payload for an existing record.
    ///
    /// A `sid` already assigned to the record is carried over when the
    /// replacement omits it, so edits never mint a second identifier.
    pub fn revalidate(
        &self,
        schema: &FormSchema,
        raw: &Payload,
        previous: &Payload,
    ) -> Result<Payload, FieldError> {
        let input = match previous.get(SID_FIELD) {
            Some(sid) if !sid.is_null() && !raw.contains_key(SID_FIELD) => {
                let mut with_sid = raw.clone();
                with_sid.insert(SID_FIELD.to_string(), sid.clone());
                Cow::Owned(with_sid)
            }
            _ => Cow::Borrowed(raw),
        };
        self.validate(schema, &input)
    }
}

fn check_field(field: &FieldDefinition, value: &Value) -> Result<(), FieldError> {
    let name = || field.name.clone();

    match &field.kind {
        FieldKind::String { min, max } => {
            let s = as_text(field, value)?;
            let len = s.chars().count();
            if let Some(max) = *max {
                if len > max {
                    return Err(FieldError::TooLong { field: name(), max });
                }
            }
            if let Some(min) = *min {
                if len < min {
                    return Err(FieldError::TooShort { field: name(), min });
                }
            }
        }
        FieldKind::Int { min, max } => {
            let n = as_integer(value).ok_or_else(|| FieldError::NotInteger { field: name() })?;
            if let Some(min) = *min {
                if n < min {
                    return Err(FieldError::BelowMin { field: name(), min });
                }
            }
            if let Some(max) = *max {
                if n > max {
                    return Err(FieldError::AboveMax { field: name(), max });
                }
            }
        }
        FieldKind::Url => {
            let s = as_text(field, value)?;
            if !is_request_uri(s) {
                return Err(FieldError::InvalidUrl { field: name() });
            }
        }
        FieldKind::Email { max } => {
            let s = as_text(field, value)?;
            if !EMAIL_PATTERN.is_match(s) {
                return Err(FieldError::InvalidEmail { field: name() });
            }
            if let Some(max) = *max {
                if s.chars().count() > max {
                    return Err(FieldError::TooLong { field: name(), max });
                }
            }
        }
        FieldKind::Lookup { options } => {
            let s = as_text(field, value)?;
            let wanted = s.to_lowercase();
            if !options.iter().any(|o| o.to_lowercase() == wanted) {
                return Err(FieldError::InvalidOption {
                    field: name(),
                    value: s.to_string(),
                });
            }
        }
    }

    Ok(())
}

fn as_text<'a>(field: &FieldDefinition, value: &'a Value) -> Result<&'a str, FieldError> {
    value.as_str().ok_or_else(|| FieldError::NotString {
        field: field.name.clone(),
    })
}

/// Accepts JSON integers, whole floats and decimal integer strings.
fn as_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => number_to_i64(n),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
}

fn number_to_i64(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// Absolute URI, or an absolute path such as `/assets/logo.png`.
fn is_request_uri(s: &str) -> bool {
    if s.starts_with('/') {
        return RELATIVE_BASE.join(s).is_ok();
    }
    Url::parse(s).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::schema::{FieldDefinition, FormType};
    use proptest::prelude::*;
    use serde_json::json;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn field(name: &str, required: bool, kind: FieldKind) -> FieldDefinition {
        FieldDefinition::new(name, required, kind).unwrap()
    }

    fn schema(form_type: FormType, fields: Vec<FieldDefinition>) -> FormSchema {
        FormSchema::new(form_type, 1, fields, Timestamp::now()).unwrap()
    }

    fn brand_schema() -> FormSchema {
        schema(
            FormType::CustomerOrder,
            vec![field(
                "brand_name",
                true,
                FieldKind::String { min: None, max: Some(50) },
            )],
        )
    }

    fn single(kind: FieldKind) -> FormSchema {
        schema(FormType::Qualification, vec![field("f", true, kind)])
    }

    fn check(schema: &FormSchema, value: Value) -> Result<Payload, FieldError> {
        ValidationEngine::default().validate(schema, &payload(value))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Presence
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn missing_required_field_is_reported() {
        let err = check(&brand_schema(), json!({})).unwrap_err();
        assert_eq!(err.to_string(), "brand_name is required");
    }

    #[test]
    fn missing_optional_field_is_not_written() {
        let s = schema(
            FormType::Qualification,
            vec![field("address_line_2", false, FieldKind::String { min: None, max: Some(100) })],
        );
        let out = check(&s, json!({})).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn first_failing_field_in_schema_order_wins() {
        let s = schema(
            FormType::Qualification,
            vec![
                field("b", true, FieldKind::Url),
                field("a", true, FieldKind::Email { max: None }),
            ],
        );
        let err = check(&s, json!({ "a": "nope", "b": "also nope" })).unwrap_err();
        assert_eq!(err.field(), "b");
    }

    #[test]
    fn null_value_counts_as_present() {
        let err = check(&brand_schema(), json!({ "brand_name": null })).unwrap_err();
        assert_eq!(err.to_string(), "brand_name must be string");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // String
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn string_over_max_length_is_rejected() {
        let err = check(&brand_schema(), json!({ "brand_name": "A".repeat(51) })).unwrap_err();
        assert_eq!(err.to_string(), "brand_name exceeds max length 50");
    }

    #[test]
    fn string_length_counts_characters() {
        let ok = check(&brand_schema(), json!({ "brand_name": "é".repeat(50) }));
        assert!(ok.is_ok());
    }

    #[test]
    fn string_under_min_length_is_rejected() {
        let s = single(FieldKind::String { min: Some(6), max: Some(6) });
        let err = check(&s, json!({ "f": "12345" })).unwrap_err();
        assert_eq!(err, FieldError::TooShort { field: "f".into(), min: 6 });
    }

    #[test]
    fn string_rejects_numbers() {
        let err = check(&brand_schema(), json!({ "brand_name": 42 })).unwrap_err();
        assert_eq!(err, FieldError::NotString { field: "brand_name".into() });
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Int
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn int_accepts_native_whole_float_and_string_forms() {
        let s = single(FieldKind::Int { min: Some(1), max: Some(10) });
        for v in [json!(5), json!(5.0), json!("5")] {
            let out = check(&s, json!({ "f": v.clone() })).unwrap();
            assert_eq!(out["f"], v, "original value is kept");
        }
    }

    #[test]
    fn int_rejects_non_integers() {
        let s = single(FieldKind::Int { min: None, max: None });
        for v in [json!("five"), json!(2.5), json!(true), json!([1])] {
            let err = check(&s, json!({ "f": v })).unwrap_err();
            assert_eq!(err.to_string(), "f must be integer");
        }
    }

    #[test]
    fn int_bounds_are_inclusive() {
        let s = single(FieldKind::Int { min: Some(2), max: Some(4) });
        assert!(check(&s, json!({ "f": 2 })).is_ok());
        assert!(check(&s, json!({ "f": 4 })).is_ok());
        assert_eq!(
            check(&s, json!({ "f": 5 })).unwrap_err().to_string(),
            "f exceeds max 4"
        );
        assert_eq!(
            check(&s, json!({ "f": "1" })).unwrap_err().to_string(),
            "f below min 2"
        );
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Url / Email / Lookup
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn url_accepts_absolute_and_root_relative() {
        let s = single(FieldKind::Url);
        for v in ["https://acme.example/logo.png", "/assets/banner.png", "mailto:ops@acme.io"] {
            assert!(check(&s, json!({ "f": v })).is_ok(), "{v} should be accepted");
        }
    }

    #[test]
    fn url_rejects_bare_words_and_empty() {
        let s = single(FieldKind::Url);
        for v in ["acme dot com", "", "logo.png"] {
            let err = check(&s, json!({ "f": v })).unwrap_err();
            assert_eq!(err.to_string(), "f invalid URL");
        }
    }

    #[test]
    fn email_is_matched_case_insensitively() {
        let s = single(FieldKind::Email { max: Some(100) });
        assert!(check(&s, json!({ "f": "Ops.Team@Acme.IO" })).is_ok());
        assert_eq!(
            check(&s, json!({ "f": "ops@acme" })).unwrap_err().to_string(),
            "f invalid email"
        );
        assert_eq!(
            check(&s, json!({ "f": "ops@acme.museum" })).unwrap_err().to_string(),
            "f invalid email"
        );
    }

    #[test]
    fn email_length_is_checked_after_pattern() {
        let s = single(FieldKind::Email { max: Some(10) });
        let err = check(&s, json!({ "f": "longname@acme.io" })).unwrap_err();
        assert_eq!(err, FieldError::TooLong { field: "f".into(), max: 10 });
    }

    #[test]
    fn lookup_matches_options_case_insensitively() {
        let s = single(FieldKind::Lookup {
            options: vec!["OTP".into(), "PROMOTION".into()],
        });
        let out = check(&s, json!({ "f": "promotion" })).unwrap();
        assert_eq!(out["f"], "promotion");

        let err = check(&s, json!({ "f": "SPAM" })).unwrap_err();
        assert_eq!(err.to_string(), "f invalid option: SPAM");
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Business rules
    // ════════════════════════════════════════════════════════════════════════════

    #[test]
    fn zip_rule_applies_even_when_undeclared() {
        let err = check(
            &brand_schema(),
            json!({ "brand_name": "Acme", "address_zip_code": "ABC123" }),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "address_zip_code must be numeric");
    }

    #[test]
    fn zip_rule_runs_after_field_checks() {
        let err = check(&brand_schema(), json!({ "address_zip_code": "ABC" })).unwrap_err();
        assert_eq!(err.field(), "brand_name");
    }

    #[test]
    fn customer_order_gets_a_generated_sid() {
        let raw = payload(json!({ "brand_name": "Acme" }));
        let out = ValidationEngine::default()
            .validate(&brand_schema(), &raw)
            .unwrap();

        let sid = out["sid"].as_str().unwrap();
        assert!(sid.starts_with("HSN-"));
        assert_eq!(sid.len(), 12);
        assert!(!raw.contains_key("sid"), "input is not mutated");
    }

    #[test]
    fn qualification_gets_no_sid() {
        let s = single(FieldKind::String { min: None, max: None });
        let out = check(&s, json!({ "f": "x" })).unwrap();
        assert!(!out.contains_key("sid"));
    }

    #[test]
    fn undeclared_keys_pass_through() {
        let out = check(&brand_schema(), json!({ "brand_name": "Acme", "note": [1, 2] })).unwrap();
        assert_eq!(out["note"], json!([1, 2]));
    }

    #[test]
    fn revalidating_normalized_output_keeps_sid() {
        let engine = ValidationEngine::default();
        let first = engine
            .validate(&brand_schema(), &payload(json!({ "brand_name": "Acme" })))
            .unwrap();
        let second = engine.validate(&brand_schema(), &first).unwrap();
        assert_eq!(first["sid"], second["sid"]);
    }

    #[test]
    fn revalidate_carries_previous_sid_forward() {
        let engine = ValidationEngine::default();
        let previous = payload(json!({ "brand_name": "Acme", "sid": "HSN-0A1B2C3D" }));
        let edited = payload(json!({ "brand_name": "Acme Corp" }));

        let out = engine.revalidate(&brand_schema(), &edited, &previous).unwrap();
        assert_eq!(out["sid"], "HSN-0A1B2C3D");
        assert_eq!(out["brand_name"], "Acme Corp");
    }

    #[test]
    fn custom_rules_are_honoured() {
        let engine = ValidationEngine::new(ZipCodeRule::LegacySubstring, SidRule::new("X-"));
        let out = engine
            .validate(
                &brand_schema(),
                &payload(json!({ "brand_name": "Acme", "address_zip_code": "0123456789" })),
            )
            .unwrap();
        assert!(out["sid"].as_str().unwrap().starts_with("X-"));
    }

    proptest! {
        #[test]
        fn missing_required_field_is_always_named(name in "[a-z_]{1,24}") {
            let s = schema(
                FormType::Qualification,
                vec![field(&name, true, FieldKind::Url)],
            );
            let err = ValidationEngine::default().validate(&s, &Payload::new()).unwrap_err();
            prop_assert_eq!(err, FieldError::Required { field: name });
        }

        #[test]
        fn string_within_bounds_is_accepted(value in "[a-zA-Z0-9 ]{0,50}") {
            let out = check(&brand_schema(), json!({ "brand_name": value.clone() }));
            prop_assert!(out.is_ok());
            let out = out.unwrap();
            prop_assert_eq!(out["brand_name"].as_str(), Some(value.as_str()));
        }
    }
}
