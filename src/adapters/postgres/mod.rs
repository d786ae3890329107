//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSchemaRepository` - Versioned schemas, unique per `(form_type, version)`
//! - `PostgresSubmissionRepository` - Revision-guarded submissions with transactional audit writes
//! - `PostgresAuditLog` - Append-only audit trail

mod audit_log;
mod schema_repository;
mod submission_repository;

pub use audit_log::PostgresAuditLog;
pub use schema_repository::PostgresSchemaRepository;
pub use submission_repository::PostgresSubmissionRepository;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use crate::config::DatabaseConfig;
use crate::domain::foundation::DomainError;

/// Opens a connection pool and, if configured, applies pending migrations.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DomainError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.acquire_timeout())
        .idle_timeout(Some(config.idle_timeout()))
        .max_lifetime(Some(config.max_lifetime()))
        .connect(&config.url)
        .await
        .map_err(|e| DomainError::database(format!("Failed to connect to database: {}", e)))?;

    if config.run_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to run migrations: {}", e)))?;
    }

    Ok(pool)
}
