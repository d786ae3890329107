//! PostgreSQL implementation of SubmissionRepository.
//!
//! Every write runs in one transaction with its audit inserts. Updates are
//! guarded by `revision`; a stale revision affects zero rows.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{DomainError, ErrorCode, SubmissionId, Timestamp, UserId};
use crate::domain::submission::{Submission, SubmissionStatus};
use crate::domain::validation::Payload;
use crate::ports::{SubmissionFilter, SubmissionRepository};

use super::audit_log::append_in_tx;

/// PostgreSQL implementation of SubmissionRepository.
#[derive(Clone)]
pub struct PostgresSubmissionRepository {
    pool: PgPool,
}

impl PostgresSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubmissionRepository for PostgresSubmissionRepository {
    async fn insert(&self, submission: &Submission, audit: &[AuditEntry]) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        sqlx::query(
            r#"
            INSERT INTO submissions (
                id, form_type, schema_version, owner_id, data, status, revision,
                created_by, updated_by, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(submission.id.as_uuid())
        .bind(submission.form_type.as_str())
        .bind(submission.schema_version as i32)
        .bind(submission.owner_id.as_str())
        .bind(Json(&submission.data))
        .bind(submission.status.as_str())
        .bind(submission.revision as i32)
        .bind(submission.created_by.as_str())
        .bind(submission.updated_by.as_str())
        .bind(submission.created_at.as_datetime())
        .bind(submission.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to insert submission: {}", e)))?;

        append_in_tx(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn update(
        &self,
        submission: &Submission,
        expected_revision: u32,
        audit: &[AuditEntry],
    ) -> Result<(), DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DomainError::database(format!("Failed to start transaction: {}", e)))?;

        let result = sqlx::query(
            r#"
            UPDATE submissions SET
                data = $3,
                status = $4,
                revision = $5,
                updated_by = $6,
                updated_at = $7
            WHERE id = $1 AND revision = $2
            "#,
        )
        .bind(submission.id.as_uuid())
        .bind(expected_revision as i32)
        .bind(Json(&submission.data))
        .bind(submission.status.as_str())
        .bind(submission.revision as i32)
        .bind(submission.updated_by.as_str())
        .bind(submission.updated_at.as_datetime())
        .execute(&mut *tx)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update submission: {}", e)))?;

        if result.rows_affected() == 0 {
            let exists: Option<(i32,)> =
                sqlx::query_as("SELECT revision FROM submissions WHERE id = $1")
                    .bind(submission.id.as_uuid())
                    .fetch_optional(&mut *tx)
                    .await
                    .map_err(|e| {
                        DomainError::database(format!("Failed to check submission: {}", e))
                    })?;

            return Err(match exists {
                None => DomainError::new(
                    ErrorCode::SubmissionNotFound,
                    format!("Submission not found: {}", submission.id),
                ),
                Some((current,)) => DomainError::conflict(format!(
                    "Submission {} is at revision {}, expected {}",
                    submission.id, current, expected_revision
                )),
            });
        }

        append_in_tx(&mut tx, audit).await?;

        tx.commit()
            .await
            .map_err(|e| DomainError::database(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    async fn find_by_id(&self, id: &SubmissionId) -> Result<Option<Submission>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, form_type, schema_version, owner_id, data, status, revision,
                   created_by, updated_by, created_at, updated_at
            FROM submissions
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch submission: {}", e)))?;

        row.map(row_to_submission).transpose()
    }

    async fn list(&self, filter: &SubmissionFilter) -> Result<Vec<Submission>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, form_type, schema_version, owner_id, data, status, revision,
                   created_by, updated_by, created_at, updated_at
            FROM submissions
            WHERE ($1::TEXT IS NULL OR owner_id = $1)
              AND ($2::TEXT IS NULL OR status = $2)
              AND ($3::TIMESTAMPTZ IS NULL OR created_at >= $3)
              AND ($4::TIMESTAMPTZ IS NULL OR created_at <= $4)
            ORDER BY created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        )
        .bind(filter.owner_id.as_ref().map(|u| u.as_str().to_string()))
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.created_from.map(|t| *t.as_datetime()))
        .bind(filter.created_to.map(|t| *t.as_datetime()))
        .bind(i64::from(filter.limit))
        .bind(i64::from(filter.offset))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list submissions: {}", e)))?;

        rows.into_iter().map(row_to_submission).collect()
    }
}

fn row_to_submission(row: sqlx::postgres::PgRow) -> Result<Submission, DomainError> {
    let get_err = |col: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to get {}: {}", col, e))
    };
    let user = |col: &str, value: String| {
        UserId::new(value).map_err(|e| DomainError::database(format!("Invalid {}: {}", col, e)))
    };
    let counter = |col: &str, value: i32| {
        u32::try_from(value)
            .map_err(|_| DomainError::database(format!("Invalid {} in database: {}", col, value)))
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| get_err("id", e))?;

    let form_type: String = row.try_get("form_type").map_err(|e| get_err("form_type", e))?;
    let form_type = form_type
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid form_type in database: {}", e)))?;

    let schema_version: i32 = row
        .try_get("schema_version")
        .map_err(|e| get_err("schema_version", e))?;
    let owner_id: String = row.try_get("owner_id").map_err(|e| get_err("owner_id", e))?;
    let Json(data): Json<Payload> = row.try_get("data").map_err(|e| get_err("data", e))?;

    let status: String = row.try_get("status").map_err(|e| get_err("status", e))?;
    let status: SubmissionStatus = status
        .parse()
        .map_err(|e| DomainError::database(format!("Invalid status in database: {}", e)))?;

    let revision: i32 = row.try_get("revision").map_err(|e| get_err("revision", e))?;
    let created_by: String = row.try_get("created_by").map_err(|e| get_err("created_by", e))?;
    let updated_by: String = row.try_get("updated_by").map_err(|e| get_err("updated_by", e))?;
    let created_at: chrono::DateTime<chrono::Utc> =
        row.try_get("created_at").map_err(|e| get_err("created_at", e))?;
    let updated_at: chrono::DateTime<chrono::Utc> =
        row.try_get("updated_at").map_err(|e| get_err("updated_at", e))?;

    Ok(Submission {
        id: SubmissionId::from_uuid(id),
        form_type,
        schema_version: counter("schema_version", schema_version)?,
        owner_id: user("owner_id", owner_id)?,
        data,
        status,
        revision: counter("revision", revision)?,
        created_by: user("created_by", created_by)?,
        updated_by: user("updated_by", updated_by)?,
        created_at: Timestamp::from_datetime(created_at),
        updated_at: Timestamp::from_datetime(updated_at),
    })
}
