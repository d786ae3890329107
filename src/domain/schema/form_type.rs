//! Logical category of onboarding form.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SchemaError;

/// Form category. Each category has its own independent version sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormType {
    /// Order details for a messaging agent (brand, agent, webhook).
    CustomerOrder,
    /// Business qualification (organization, address, contact).
    Qualification,
}

impl FormType {
    pub const ALL: [FormType; 2] = [FormType::CustomerOrder, FormType::Qualification];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormType::CustomerOrder => "customer_order",
            FormType::Qualification => "qualification",
        }
    }

    /// Whether submissions of this type get a synthetic `sid`.
    pub fn assigns_sid(&self) -> bool {
        matches!(self, FormType::CustomerOrder)
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer_order" => Ok(FormType::CustomerOrder),
            "qualification" => Ok(FormType::Qualification),
            other => Err(SchemaError::invalid_form_type(other)),
        }
    }
}
