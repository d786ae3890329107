//! Shared fixtures for submission handler tests.

use std::sync::Arc;

use serde_json::json;

use crate::adapters::memory::{
    InMemoryAuditLog, InMemorySchemaRepository, InMemorySubmissionRepository,
};
use crate::domain::foundation::{CommandMetadata, Role, UserId};
use crate::domain::schema::{FieldSpec, FormSchema, FormType};
use crate::domain::submission::Submission;
use crate::domain::validation::{Payload, ValidationEngine};
use crate::ports::{SchemaRepository, SubmissionRepository};

pub struct Fixture {
    pub schemas: Arc<InMemorySchemaRepository>,
    pub submissions: Arc<InMemorySubmissionRepository>,
    pub audit: InMemoryAuditLog,
    pub engine: Arc<ValidationEngine>,
}

impl Fixture {
    /// Stores with version 1 of a small customer-order schema published.
    pub async fn new() -> Self {
        let audit = InMemoryAuditLog::new();
        let fixture = Self {
            schemas: Arc::new(InMemorySchemaRepository::new()),
            submissions: Arc::new(InMemorySubmissionRepository::new(audit.clone())),
            audit,
            engine: Arc::new(ValidationEngine::default()),
        };
        fixture
            .schemas
            .insert(&order_schema(1, 50))
            .await
            .unwrap();
        fixture
    }

    /// Persists a submission built directly, bypassing the create handler.
    pub async fn stored(&self, owner: &str, is_draft: bool) -> Submission {
        let data = self
            .engine
            .validate(&order_schema(1, 50), &payload("Acme"))
            .unwrap();
        let submission = Submission::create(
            FormType::CustomerOrder,
            1,
            UserId::new(owner).unwrap(),
            data,
            is_draft,
        );
        self.submissions
            .insert(&submission, &submission.creation_audit())
            .await
            .unwrap();
        submission
    }
}

pub fn order_schema(version: u32, brand_max: i64) -> FormSchema {
    let spec = |name: &str, field_type: &str, required: bool, max: Option<i64>| FieldSpec {
        name: name.to_string(),
        field_type: field_type.to_string(),
        required,
        min: None,
        max,
        options: vec![],
    };
    FormSchema::from_specs(
        FormType::CustomerOrder,
        version,
        vec![
            spec("brand_name", "string", true, Some(brand_max)),
            spec("message_webhook_url", "url", true, None),
            spec("sid", "string", false, None),
        ],
    )
    .unwrap()
}

pub fn payload(brand: &str) -> Payload {
    match json!({
        "brand_name": brand,
        "message_webhook_url": "https://hooks.example.com/rcs",
    }) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    }
}

pub fn customer(id: &str) -> CommandMetadata {
    CommandMetadata::test_fixture(id, Role::Customer)
}

pub fn reviewer(id: &str) -> CommandMetadata {
    CommandMetadata::test_fixture(id, Role::Tpm)
}

pub fn admin() -> CommandMetadata {
    CommandMetadata::test_fixture("admin-1", Role::Admin)
}
