//! PostgreSQL implementation of SchemaRepository.
//!
//! Fields are stored as JSONB in their wire shape and re-parsed on read, so
//! a row written with an unsupported field type surfaces as
//! `UnknownFieldType` instead of reaching the validation engine.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, Timestamp};
use crate::domain::schema::{parse_fields, FieldSpec, FormSchema, FormType};
use crate::ports::SchemaRepository;

/// PostgreSQL implementation of SchemaRepository.
#[derive(Clone)]
pub struct PostgresSchemaRepository {
    pool: PgPool,
}

impl PostgresSchemaRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "SELECT form_type, version, fields, created_at FROM form_schemas";

#[async_trait]
impl SchemaRepository for PostgresSchemaRepository {
    async fn insert(&self, schema: &FormSchema) -> Result<(), DomainError> {
        let fields: Vec<FieldSpec> = schema.fields().iter().cloned().map(FieldSpec::from).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO form_schemas (form_type, version, fields, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(schema.form_type.as_str())
        .bind(schema.version as i32)
        .bind(Json(fields))
        .bind(schema.created_at.as_datetime())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::conflict(format!(
                    "Schema {} version {} already exists",
                    schema.form_type, schema.version
                )))
            }
            Err(e) => Err(DomainError::database(format!(
                "Failed to insert form schema: {}",
                e
            ))),
        }
    }

    async fn latest(&self, form_type: FormType) -> Result<Option<FormSchema>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE form_type = $1 ORDER BY version DESC LIMIT 1",
            SELECT_COLUMNS
        ))
        .bind(form_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch latest schema: {}", e)))?;

        row.map(row_to_schema).transpose()
    }

    async fn find_version(
        &self,
        form_type: FormType,
        version: u32,
    ) -> Result<Option<FormSchema>, DomainError> {
        let row = sqlx::query(&format!(
            "{} WHERE form_type = $1 AND version = $2",
            SELECT_COLUMNS
        ))
        .bind(form_type.as_str())
        .bind(version as i32)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch schema version: {}", e)))?;

        row.map(row_to_schema).transpose()
    }

    async fn list(&self, form_type: FormType) -> Result<Vec<FormSchema>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE form_type = $1 ORDER BY version DESC",
            SELECT_COLUMNS
        ))
        .bind(form_type.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list schemas: {}", e)))?;

        rows.into_iter().map(row_to_schema).collect()
    }
}

fn row_to_schema(row: sqlx::postgres::PgRow) -> Result<FormSchema, DomainError> {
    let get_err = |col: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to get {}: {}", col, e))
    };

    let form_type: String = row.try_get("form_type").map_err(|e| get_err("form_type", e))?;
    let form_type: FormType = form_type
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid form_type in database: {}", e)))?;

    let version: i32 = row.try_get("version").map_err(|e| get_err("version", e))?;
    let version = u32::try_from(version)
        .map_err(|_| DomainError::database(format!("Invalid version in database: {}", version)))?;

    let Json(specs): Json<Vec<FieldSpec>> =
        row.try_get("fields").map_err(|e| get_err("fields", e))?;
    let fields = parse_fields(specs).map_err(|e| {
        DomainError::new(
            ErrorCode::UnknownFieldType,
            format!("{} v{}: {}", form_type, version, e),
        )
    })?;

    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| get_err("created_at", e))?;

    FormSchema::new(form_type, version, fields, Timestamp::from_datetime(created_at)).map_err(|e| {
        DomainError::new(
            ErrorCode::UnknownFieldType,
            format!("{} v{}: {}", form_type, version, e),
        )
    })
}
