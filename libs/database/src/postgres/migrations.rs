use sea_orm::SqlxPostgresConnector;
use sea_orm_migration::MigratorTrait;
use sqlx::PgPool;
use tracing::info;

use crate::common::DatabaseError;

/// Run migrations with the provided Migrator over an existing pool
///
/// The migration files stay in the `migration` crate; this only bridges the
/// sqlx pool owned by a [`super::PoolManager`] to SeaORM's migrator.
///
/// # Example
/// ```ignore
/// use migration::Migrator;
/// use database::postgres::run_migrations;
///
/// let pool = manager.pool()?;
/// run_migrations::<Migrator>(&pool, "chatbot_api").await?;
/// ```
pub async fn run_migrations<M: MigratorTrait>(
    pool: &PgPool,
    app_name: &str,
) -> Result<(), DatabaseError> {
    info!("Running {} database migrations...", app_name);
    let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
    M::up(&db, None)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))?;
    info!("Migrations completed successfully for {}", app_name);
    Ok(())
}

/// Roll back the last `steps` migrations (all of them when `None`)
pub async fn rollback_migrations<M: MigratorTrait>(
    pool: &PgPool,
    steps: Option<u32>,
) -> Result<(), DatabaseError> {
    info!(?steps, "Rolling back database migrations");
    let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
    M::down(&db, steps)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))
}

/// Log the applied/pending state of every migration
pub async fn migration_status<M: MigratorTrait>(pool: &PgPool) -> Result<(), DatabaseError> {
    let db = SqlxPostgresConnector::from_sqlx_postgres_pool(pool.clone());
    M::status(&db)
        .await
        .map_err(|e| DatabaseError::MigrationError(e.to_string()))
}
