//! Onboarding service entry point.
//!
//! Loads configuration, connects to PostgreSQL, publishes the default
//! templates on an empty registry and serves the HTTP API.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use onboarding::adapters::auth::JwtSessionValidator;
use onboarding::adapters::http::{api_router, ApiDependencies};
use onboarding::adapters::postgres::{
    self, PostgresAuditLog, PostgresSchemaRepository, PostgresSubmissionRepository,
};
use onboarding::application::seed::seed_templates;
use onboarding::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    let pool = postgres::connect(&config.database).await?;
    tracing::info!("Connected to database");

    let schemas = Arc::new(PostgresSchemaRepository::new(pool.clone()));
    if config.database.seed_templates {
        let seeded = seed_templates(schemas.as_ref()).await?;
        if !seeded.is_empty() {
            tracing::info!(count = seeded.len(), "Published default form templates");
        }
    }

    let deps = ApiDependencies {
        schemas,
        submissions: Arc::new(PostgresSubmissionRepository::new(pool.clone())),
        audit: Arc::new(PostgresAuditLog::new(pool)),
        engine: Arc::new(config.validation.engine()),
        validator: Arc::new(JwtSessionValidator::new(&config.auth)),
    };
    let app = api_router(deps, &config.server);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind to {}: {}", addr, e);
        e
    })?;
    tracing::info!(
        environment = ?config.server.environment,
        "Onboarding service listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` overrides
/// the configured filter.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}
