//! Integration tests for the HTTP API.
//!
//! Drives the full router (auth middleware, role checks, handlers, error
//! mapping) over the in-memory stores with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use onboarding::adapters::auth::MockSessionValidator;
use onboarding::adapters::http::{api_router, ApiDependencies};
use onboarding::adapters::memory::{
    InMemoryAuditLog, InMemorySchemaRepository, InMemorySubmissionRepository,
};
use onboarding::config::{ServerConfig, ValidationConfig};
use onboarding::domain::foundation::Role;

// =============================================================================
// Test Infrastructure
// =============================================================================

const ADMIN: &str = "admin-token";
const CUSTOMER: &str = "customer-token";
const OTHER_CUSTOMER: &str = "other-customer-token";
const TPM: &str = "tpm-token";
const SALES: &str = "sales-token";

fn app() -> Router {
    let audit = InMemoryAuditLog::new();
    let validator = MockSessionValidator::new()
        .with_test_user(ADMIN, "admin-1", Role::Admin)
        .with_test_user(CUSTOMER, "cust-1", Role::Customer)
        .with_test_user(OTHER_CUSTOMER, "cust-2", Role::Customer)
        .with_test_user(TPM, "tpm-1", Role::Tpm)
        .with_test_user(SALES, "sales-1", Role::Sales);

    let deps = ApiDependencies {
        schemas: Arc::new(InMemorySchemaRepository::new()),
        submissions: Arc::new(InMemorySubmissionRepository::new(audit.clone())),
        audit: Arc::new(audit),
        engine: Arc::new(ValidationConfig::default().engine()),
        validator: Arc::new(validator),
    };
    api_router(deps, &ServerConfig::default())
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn order_fields() -> Value {
    json!([
        {"name": "brand_name", "type": "string", "required": true, "max": 50},
        {"name": "message_webhook_url", "type": "url", "required": true},
        {"name": "contact_email", "type": "email"}
    ])
}

async fn publish_order_schema(app: &Router) {
    let (status, _) = send(
        app,
        Method::POST,
        "/api/v1/forms/customer_order",
        Some(ADMIN),
        Some(json!({ "schema": order_fields() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn create_order(app: &Router, token: &str, is_draft: bool) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/submissions/customer_order",
        Some(token),
        Some(json!({
            "data": {
                "brand_name": "Acme",
                "message_webhook_url": "https://acme.example.com/hooks"
            },
            "is_draft": is_draft
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {}", body);
    body
}

// =============================================================================
// Authentication
// =============================================================================

#[tokio::test]
async fn health_does_not_require_a_token() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/v1/submissions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn unknown_token_is_rejected_by_middleware() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/submissions",
        Some("forged"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "AUTH_ERROR");
}

// =============================================================================
// Schema registry
// =============================================================================

#[tokio::test]
async fn admin_publishes_gapless_versions() {
    let app = app();
    publish_order_schema(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/forms/customer_order",
        Some(ADMIN),
        Some(json!({ "schema": order_fields() })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["version"], 2);
    assert_eq!(body["form_type"], "customer_order");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/forms/customer_order/versions",
        Some(CUSTOMER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let versions: Vec<u64> = body["versions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["version"].as_u64().unwrap())
        .collect();
    assert_eq!(versions, vec![2, 1]);

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/forms/customer_order/versions/latest",
        Some(TPM),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 2);
    assert_eq!(body["schema"][0]["name"], "brand_name");

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/forms/customer_order/versions/1",
        Some(TPM),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], 1);
}

#[tokio::test]
async fn missing_versions_are_not_found() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/forms/qualification/versions/latest",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "SCHEMA_NOT_FOUND");

    publish_order_schema(&app).await;
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/forms/customer_order/versions/9",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unpublished_form_type_lists_no_versions() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::GET,
        "/api/v1/forms/qualification/versions",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["versions"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn empty_schema_is_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/forms/qualification",
        Some(ADMIN),
        Some(json!({ "schema": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Schema cannot be empty");
}

#[tokio::test]
async fn unknown_field_type_is_rejected_at_authoring() {
    let app = app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/forms/qualification",
        Some(ADMIN),
        Some(json!({ "schema": [{"name": "color", "type": "colour"}] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "unknown type colour for color");
}

#[tokio::test]
async fn unknown_form_type_is_bad_request() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/forms/invoice",
        Some(ADMIN),
        Some(json!({ "schema": order_fields() })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn only_admins_publish_schemas() {
    let app = app();
    for token in [CUSTOMER, TPM, SALES] {
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/v1/forms/customer_order",
            Some(token),
            Some(json!({ "schema": order_fields() })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "FORBIDDEN");
    }
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/forms/customer_order")
        .header(header::AUTHORIZATION, format!("Bearer {}", ADMIN))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Submission workflow
// =============================================================================

#[tokio::test]
async fn draft_to_approval_round_trip() {
    let app = app();
    publish_order_schema(&app).await;

    let created = create_order(&app, CUSTOMER, true).await;
    assert_eq!(created["status"], "Draft");
    assert_eq!(created["schema_version"], 1);
    assert_eq!(created["owner_id"], "cust-1");
    assert!(created["data"]["sid"].as_str().unwrap().starts_with("HSN-"));
    let id = created["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/submissions/{}", id),
        Some(CUSTOMER),
        Some(json!({
            "data": {
                "brand_name": "Acme Rebrand",
                "message_webhook_url": "https://acme.example.com/v2"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "unexpected body: {}", updated);
    assert_eq!(updated["data"]["brand_name"], "Acme Rebrand");
    assert_eq!(updated["data"]["sid"], created["data"]["sid"]);

    let (status, submitted) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/submit", id),
        Some(CUSTOMER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submitted["status"], "Submitted");

    let (status, reviewed) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/review", id),
        Some(TPM),
        Some(json!({ "status": "In Review", "remarks": "picked up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["message"], "review completed");
    assert_eq!(reviewed["submission"]["status"], "In Review");

    let (status, approved) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/review", id),
        Some(SALES),
        Some(json!({ "status": "Approved", "remarks": "looks good" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["submission"]["status"], "Approved");

    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/review", id),
        Some(TPM),
        Some(json!({ "status": "Rejected" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_STATE_TRANSITION");

    let (status, history) = send(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{}/history", id),
        Some(CUSTOMER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let actions: Vec<&str> = history["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["action"].as_str().unwrap())
        .collect();
    assert_eq!(
        actions,
        vec![
            "Updated Draft",
            "Submitted",
            "Status changed to In Review",
            "Status changed to Approved",
        ]
    );
    assert_eq!(history["entries"][3]["remarks"], "looks good");
    assert_eq!(history["entries"][3]["actor_id"], "sales-1");
}

#[tokio::test]
async fn direct_submission_records_initial_audit_entry() {
    let app = app();
    publish_order_schema(&app).await;

    let created = create_order(&app, CUSTOMER, false).await;
    assert_eq!(created["status"], "Submitted");
    let id = created["id"].as_str().unwrap();

    let (_, history) = send(
        &app,
        Method::GET,
        &format!("/api/v1/submissions/{}/history", id),
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(history["entries"][0]["action"], "Submitted");
    assert_eq!(history["entries"][0]["remarks"], "Initial submission");
}

#[tokio::test]
async fn invalid_payload_reports_first_failing_field() {
    let app = app();
    publish_order_schema(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/submissions/customer_order",
        Some(CUSTOMER),
        Some(json!({
            "data": {
                "brand_name": "Acme",
                "message_webhook_url": "not a url"
            }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "FIELD_VALIDATION_FAILED");
    assert_eq!(body["message"], "message_webhook_url invalid URL");
    assert_eq!(body["details"]["field"], "message_webhook_url");
}

#[tokio::test]
async fn creating_without_a_schema_is_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/v1/submissions/qualification",
        Some(CUSTOMER),
        Some(json!({ "data": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn staff_cannot_create_or_edit_submissions() {
    let app = app();
    publish_order_schema(&app).await;

    for token in [ADMIN, TPM, SALES] {
        let (status, _) = send(
            &app,
            Method::POST,
            "/api/v1/submissions/customer_order",
            Some(token),
            Some(json!({ "data": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[tokio::test]
async fn customers_cannot_review() {
    let app = app();
    publish_order_schema(&app).await;
    let created = create_order(&app, CUSTOMER, false).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/review", created["id"].as_str().unwrap()),
        Some(CUSTOMER),
        Some(json!({ "status": "Approved" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn unknown_review_status_is_bad_request() {
    let app = app();
    publish_order_schema(&app).await;
    let created = create_order(&app, CUSTOMER, false).await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/submissions/{}/review", created["id"].as_str().unwrap()),
        Some(TPM),
        Some(json!({ "status": "Escalated" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn other_customers_records_are_hidden() {
    let app = app();
    publish_order_schema(&app).await;
    let created = create_order(&app, CUSTOMER, true).await;
    let uri = format!("/api/v1/submissions/{}", created["id"].as_str().unwrap());

    let (status, _) = send(&app, Method::GET, &uri, Some(OTHER_CUSTOMER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(OTHER_CUSTOMER),
        Some(json!({
            "data": {
                "brand_name": "Hijack",
                "message_webhook_url": "https://evil.example.com"
            }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "unauthorized or invalid status");

    let (status, _) = send(&app, Method::GET, &uri, Some(ADMIN), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn draft_edits_do_not_reveal_whether_an_id_exists() {
    let app = app();
    publish_order_schema(&app).await;
    let foreign = create_order(&app, CUSTOMER, true).await;
    let foreign_uri = format!("/api/v1/submissions/{}", foreign["id"].as_str().unwrap());
    let missing_uri = "/api/v1/submissions/00000000-0000-4000-8000-000000000000".to_string();
    let edit = json!({ "data": { "brand_name": "Hijack" } });

    let mut outcomes = Vec::new();
    for uri in [&foreign_uri, &missing_uri] {
        let put = send(&app, Method::PUT, uri, Some(OTHER_CUSTOMER), Some(edit.clone())).await;
        let submit = send(
            &app,
            Method::POST,
            &format!("{uri}/submit"),
            Some(OTHER_CUSTOMER),
            None,
        )
        .await;
        outcomes.push((put, submit));
    }

    let (foreign_put, foreign_submit) = &outcomes[0];
    let (missing_put, missing_submit) = &outcomes[1];
    assert_eq!(foreign_put.0, StatusCode::FORBIDDEN);
    assert_eq!(foreign_put.0, missing_put.0);
    assert_eq!(foreign_put.1, missing_put.1);
    assert_eq!(foreign_submit.0, StatusCode::FORBIDDEN);
    assert_eq!(foreign_submit.0, missing_submit.0);
    assert_eq!(foreign_submit.1, missing_submit.1);
}

#[tokio::test]
async fn submitted_records_are_not_editable() {
    let app = app();
    publish_order_schema(&app).await;
    let created = create_order(&app, CUSTOMER, false).await;

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/v1/submissions/{}", created["id"].as_str().unwrap()),
        Some(CUSTOMER),
        Some(json!({ "data": { "brand_name": "Late edit" } })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn malformed_submission_id_is_bad_request() {
    let app = app();
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/submissions/not-a-uuid",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn listing_is_scoped_to_the_caller() {
    let app = app();
    publish_order_schema(&app).await;
    create_order(&app, CUSTOMER, true).await;
    create_order(&app, CUSTOMER, false).await;
    create_order(&app, OTHER_CUSTOMER, false).await;

    let (status, own) = send(&app, Method::GET, "/api/v1/submissions", Some(CUSTOMER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(own["count"], 2);

    // customer_id is ignored for non-admins
    let (_, still_own) = send(
        &app,
        Method::GET,
        "/api/v1/submissions?customer_id=cust-2",
        Some(CUSTOMER),
        None,
    )
    .await;
    assert_eq!(still_own["count"], 2);

    let (_, all) = send(&app, Method::GET, "/api/v1/submissions", Some(ADMIN), None).await;
    assert_eq!(all["count"], 3);

    let (_, filtered) = send(
        &app,
        Method::GET,
        "/api/v1/submissions?customer_id=cust-2",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(filtered["count"], 1);
    assert_eq!(filtered["submissions"][0]["owner_id"], "cust-2");

    let (_, drafts) = send(
        &app,
        Method::GET,
        "/api/v1/submissions?status=Draft",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(drafts["count"], 1);

    let (_, paged) = send(
        &app,
        Method::GET,
        "/api/v1/submissions?limit=1&offset=1",
        Some(ADMIN),
        None,
    )
    .await;
    assert_eq!(paged["count"], 1);
}

#[tokio::test]
async fn malformed_list_parameters_are_bad_request() {
    let app = app();
    for query in [
        "limit=ten",
        "offset=-1",
        "status=Archived",
        "start_date=2024-13-01",
        "start_date=2024-05-02&end_date=2024-05-01",
    ] {
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/api/v1/submissions?{}", query),
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "query {} gave {}", query, body);
    }
}
