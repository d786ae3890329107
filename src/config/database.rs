//! PostgreSQL pool settings and startup switches.
//!
//! Every knob except `url` has a default, so a bare
//! `ONBOARDING__DATABASE__URL` is enough for a local run.

use serde::Deserialize;
use std::time::Duration;
use url::Url;

use super::error::ValidationError;

const POOL_CEILING: u32 = 100;
const ACCEPTED_SCHEMES: [&str; 2] = ["postgres", "postgresql"];

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// `postgres://` or `postgresql://` connection string
    pub url: String,

    #[serde(default = "DatabaseConfig::default_min_connections")]
    pub min_connections: u32,

    #[serde(default = "DatabaseConfig::default_max_connections")]
    pub max_connections: u32,

    #[serde(default = "DatabaseConfig::default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,

    #[serde(default = "DatabaseConfig::default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    #[serde(default = "DatabaseConfig::default_max_lifetime_secs")]
    pub max_lifetime_secs: u64,

    /// Apply `migrations/` before serving
    #[serde(default)]
    pub run_migrations: bool,

    /// Publish the bundled form templates when the registry is empty
    #[serde(default = "DatabaseConfig::default_seed_templates")]
    pub seed_templates: bool,
}

impl DatabaseConfig {
    fn default_min_connections() -> u32 {
        2
    }

    fn default_max_connections() -> u32 {
        20
    }

    fn default_acquire_timeout_secs() -> u64 {
        30
    }

    fn default_idle_timeout_secs() -> u64 {
        600
    }

    fn default_max_lifetime_secs() -> u64 {
        1800
    }

    fn default_seed_templates() -> bool {
        true
    }

    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Checks the connection string scheme and the pool bounds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("DATABASE__URL"));
        }

        let scheme_ok = Url::parse(&self.url)
            .map(|parsed| ACCEPTED_SCHEMES.contains(&parsed.scheme()))
            .unwrap_or(false);
        if !scheme_ok {
            return Err(ValidationError::InvalidDatabaseUrl);
        }

        match (self.min_connections, self.max_connections) {
            (_, max) if max > POOL_CEILING => Err(ValidationError::PoolSizeTooLarge),
            (min, max) if min > max => Err(ValidationError::InvalidPoolSize),
            _ => Ok(()),
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            min_connections: Self::default_min_connections(),
            max_connections: Self::default_max_connections(),
            acquire_timeout_secs: Self::default_acquire_timeout_secs(),
            idle_timeout_secs: Self::default_idle_timeout_secs(),
            max_lifetime_secs: Self::default_max_lifetime_secs(),
            run_migrations: false,
            seed_templates: Self::default_seed_templates(),
        }
    }
}
