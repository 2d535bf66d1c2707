use core_config::ConfigError;

/// Database error type for pool management and health checks
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Required connection settings are missing or invalid. Not retryable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Checking out a connection or running a query failed
    #[cfg(feature = "postgres")]
    #[error("PostgreSQL connection error: {0}")]
    Connection(#[source] sqlx::Error),

    /// Health check failed
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// Migration error
    #[error("Migration error: {0}")]
    MigrationError(String),
}

impl DatabaseError {
    /// Whether this error comes from configuration rather than the database itself
    pub fn is_config(&self) -> bool {
        matches!(self, DatabaseError::Config(_))
    }
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
