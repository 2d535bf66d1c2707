use sqlx::PgPool;
use tracing::debug;

use crate::common::DatabaseError;

/// Check PostgreSQL database health
///
/// Executes `SELECT 1` through the pool to verify a connection can be
/// checked out and used. Intended for readiness probes.
///
/// # Example
/// ```ignore
/// use database::postgres::check_health;
///
/// let pool = manager.pool()?;
/// match check_health(&pool).await {
///     Ok(_) => StatusCode::OK,
///     Err(_) => StatusCode::SERVICE_UNAVAILABLE,
/// }
/// ```
pub async fn check_health(pool: &PgPool) -> Result<(), DatabaseError> {
    debug!("Running PostgreSQL health check");

    sqlx::query("SELECT 1").execute(pool).await.map_err(|e| {
        DatabaseError::HealthCheckFailed(format!("PostgreSQL health check failed: {}", e))
    })?;

    debug!("PostgreSQL health check passed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_check_health_reports_unreachable_database() {
        let options = sqlx::postgres::PgConnectOptions::new()
            .host("127.0.0.1")
            .port(1)
            .username("postgres")
            .database("postgres");
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_secs(2))
            .connect_lazy_with(options);

        let err = check_health(&pool).await.unwrap_err();
        assert!(matches!(err, DatabaseError::HealthCheckFailed(ref msg) if msg.contains("health check failed")));
    }
}
