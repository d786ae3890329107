//! Bundled form templates published at bootstrap.
//!
//! Templates are embedded YAML in the schema wire format. They are
//! published as version 1 only when the registry holds no schema at all,
//! so restarts never add versions.

use crate::domain::foundation::Timestamp;
use crate::domain::schema::{parse_fields, FieldSpec, FormSchema, FormType, SchemaError};
use crate::ports::SchemaRepository;

const QUALIFICATION: &str = include_str!("templates/qualification.yaml");
const CUSTOMER_ORDER: &str = include_str!("templates/customer_order.yaml");

/// Returns the bundled field specs for a form type.
pub fn template(form_type: FormType) -> Result<Vec<FieldSpec>, SchemaError> {
    let source = match form_type {
        FormType::Qualification => QUALIFICATION,
        FormType::CustomerOrder => CUSTOMER_ORDER,
    };
    serde_yaml::from_str(source)
        .map_err(|e| SchemaError::Corrupt(format!("{} template: {}", form_type, e)))
}

/// Publishes every bundled template if the registry is empty.
///
/// Returns the schemas that were published.
pub async fn seed_templates(repository: &dyn SchemaRepository) -> Result<Vec<FormSchema>, SchemaError> {
    for form_type in FormType::ALL {
        if repository.latest(form_type).await?.is_some() {
            tracing::debug!("Schema registry already populated, skipping templates");
            return Ok(Vec::new());
        }
    }

    let mut published = Vec::with_capacity(FormType::ALL.len());
    for form_type in FormType::ALL {
        let fields = parse_fields(template(form_type)?)?;
        let schema = FormSchema::new(form_type, 1, fields, Timestamp::now())?;
        match repository.insert(&schema).await {
            Ok(()) => {
                tracing::info!(form_type = %form_type, fields = schema.fields().len(), "Seeded form template");
                published.push(schema);
            }
            // Another instance seeded concurrently
            Err(err) if err.is_conflict() => {
                tracing::debug!(form_type = %form_type, "Template already published");
            }
            Err(err) => return Err(err.into()),
        }
    }
    Ok(published)
}
