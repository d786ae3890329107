//! Errors raised while loading or checking configuration

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing variables or values that do not deserialize
    #[error("could not load configuration: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("configuration rejected: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value that is well-typed but unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required setting {0} is missing")]
    MissingRequired(&'static str),

    #[error("{0} is not a bindable socket address")]
    InvalidAddress(String),

    #[error("port must be non-zero")]
    InvalidPort,

    #[error("request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("database url must use the postgres:// or postgresql:// scheme")]
    InvalidDatabaseUrl,

    #[error("min_connections is larger than max_connections")]
    InvalidPoolSize,

    #[error("max_connections may not exceed 100")]
    PoolSizeTooLarge,

    #[error("JWT secret must be at least {0} bytes")]
    JwtSecretTooShort(usize),

    #[error("token leeway may not exceed 300 seconds")]
    LeewayTooLarge,

    #[error("SID prefix must be non-empty and contain no whitespace")]
    InvalidSidPrefix,
}
