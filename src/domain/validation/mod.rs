//! Validation engine for submission payloads.

mod engine;
mod errors;
mod rules;

pub use engine::{Payload, ValidationEngine};
pub use errors::FieldError;
pub use rules::{SidRule, ZipCodeRule, DEFAULT_SID_PREFIX, SID_FIELD, ZIP_CODE_FIELD};
