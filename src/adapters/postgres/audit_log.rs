//! PostgreSQL implementation of AuditLog.

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Row};

use crate::domain::audit::AuditEntry;
use crate::domain::foundation::{AuditEntryId, DomainError, SubmissionId, Timestamp, UserId};
use crate::ports::AuditLog;

/// PostgreSQL implementation of AuditLog.
#[derive(Clone)]
pub struct PostgresAuditLog {
    pool: PgPool,
}

impl PostgresAuditLog {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Inserts audit entries on an existing connection or transaction.
pub(super) async fn append_in_tx(
    conn: &mut PgConnection,
    entries: &[AuditEntry],
) -> Result<(), DomainError> {
    for entry in entries {
        sqlx::query(
            r#"
            INSERT INTO audit_entries (id, submission_id, actor_id, action, remarks, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.submission_id.as_uuid())
        .bind(entry.actor_id.as_str())
        .bind(&entry.action)
        .bind(&entry.remarks)
        .bind(entry.created_at.as_datetime())
        .execute(&mut *conn)
        .await
        .map_err(|e| DomainError::database(format!("Failed to append audit entry: {}", e)))?;
    }
    Ok(())
}

#[async_trait]
impl AuditLog for PostgresAuditLog {
    async fn append(&self, entry: &AuditEntry) -> Result<(), DomainError> {
        let mut conn = self
            .pool
            .acquire()
            .await
            .map_err(|e| DomainError::database(format!("Failed to acquire connection: {}", e)))?;
        append_in_tx(&mut conn, std::slice::from_ref(entry)).await
    }

    async fn history(&self, submission_id: &SubmissionId) -> Result<Vec<AuditEntry>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, submission_id, actor_id, action, remarks, created_at
            FROM audit_entries
            WHERE submission_id = $1
            ORDER BY seq ASC
            "#,
        )
        .bind(submission_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch audit history: {}", e)))?;

        rows.into_iter().map(row_to_entry).collect()
    }
}

fn row_to_entry(row: sqlx::postgres::PgRow) -> Result<AuditEntry, DomainError> {
    let get_err = |col: &str, e: sqlx::Error| {
        DomainError::database(format!("Failed to get {}: {}", col, e))
    };

    let id: uuid::Uuid = row.try_get("id").map_err(|e| get_err("id", e))?;
    let submission_id: uuid::Uuid = row
        .try_get("submission_id")
        .map_err(|e| get_err("submission_id", e))?;
    let actor_id: String = row.try_get("actor_id").map_err(|e| get_err("actor_id", e))?;
    let action: String = row.try_get("action").map_err(|e| get_err("action", e))?;
    let remarks: String = row.try_get("remarks").map_err(|e| get_err("remarks", e))?;
    let created_at: chrono::DateTime<chrono::Utc> = row
        .try_get("created_at")
        .map_err(|e| get_err("created_at", e))?;

    Ok(AuditEntry {
        id: AuditEntryId::from_uuid(id),
        submission_id: SubmissionId::from_uuid(submission_id),
        actor_id: UserId::new(actor_id)
            .map_err(|e| DomainError::database(format!("Invalid actor_id: {}", e)))?,
        action,
        remarks,
        created_at: Timestamp::from_datetime(created_at),
    })
}
