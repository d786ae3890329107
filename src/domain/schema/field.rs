//! Field definitions.
//!
//! On the wire a field is the loose record `{name, type, required, min,
//! max, options}`. Inside the domain it is a `FieldDefinition` whose
//! `FieldKind` only carries the constraints meaningful for its type, so an
//! unsupported `type` is rejected when the schema is read rather than when
//! a payload is validated.

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// Wire representation of one schema field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,

    #[serde(rename = "type")]
    pub field_type: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

/// Type of a field together with its type-specific constraints.
///
/// A bound of `None` means unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Text; bounds are character counts.
    String { min: Option<usize>, max: Option<usize> },
    /// Integer; bounds are inclusive values.
    Int { min: Option<i64>, max: Option<i64> },
    /// Absolute URL or root-relative reference.
    Url,
    /// Email address; `max` is a character count.
    Email { max: Option<usize> },
    /// One of a fixed set of options, matched case-insensitively.
    Lookup { options: Vec<String> },
}

impl FieldKind {
    /// Wire name of this kind.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::String { .. } => "string",
            FieldKind::Int { .. } => "int",
            FieldKind::Url => "url",
            FieldKind::Email { .. } => "email",
            FieldKind::Lookup { .. } => "lookup",
        }
    }
}

/// One validated field of a form schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FieldSpec", into = "FieldSpec")]
pub struct FieldDefinition {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub fn new(name: impl Into<String>, required: bool, kind: FieldKind) -> Result<Self, SchemaError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SchemaError::EmptyFieldName);
        }
        Ok(Self { name, required, kind })
    }
}

fn positive(bound: Option<i64>) -> Option<i64> {
    bound.filter(|n| *n > 0)
}

fn length(bound: Option<i64>) -> Option<usize> {
    positive(bound).and_then(|n| usize::try_from(n).ok())
}

impl TryFrom<FieldSpec> for FieldDefinition {
    type Error = SchemaError;

    fn try_from(spec: FieldSpec) -> Result<Self, Self::Error> {
        let kind = match spec.field_type.as_str() {
            "string" => FieldKind::String {
                min: length(spec.min),
                max: length(spec.max),
            },
            "int" => FieldKind::Int {
                min: positive(spec.min),
                max: positive(spec.max),
            },
            "url" => FieldKind::Url,
            "email" => FieldKind::Email {
                max: length(spec.max),
            },
            "lookup" => FieldKind::Lookup {
                options: spec.options,
            },
            other => return Err(SchemaError::unknown_field_type(spec.name, other)),
        };
        FieldDefinition::new(spec.name, spec.required, kind)
    }
}

impl From<FieldDefinition> for FieldSpec {
    fn from(def: FieldDefinition) -> Self {
        let field_type = def.kind.type_name().to_string();
        let (min, max, options) = match def.kind {
            FieldKind::String { min, max } => (
                min.map(|n| n as i64),
                max.map(|n| n as i64),
                Vec::new(),
            ),
            FieldKind::Int { min, max } => (min, max, Vec::new()),
            FieldKind::Url => (None, None, Vec::new()),
            FieldKind::Email { max } => (None, max.map(|n| n as i64), Vec::new()),
            FieldKind::Lookup { options } => (None, None, options),
        };
        FieldSpec {
            name: def.name,
            field_type,
            required: def.required,
            min,
            max,
            options,
        }
    }
}
