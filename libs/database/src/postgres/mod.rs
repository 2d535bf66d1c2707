//! PostgreSQL pool management and utilities
//!
//! Provides prefix-scoped configuration, the lazily created [`PoolManager`],
//! health checks and a bridge to SeaORM migrations.

mod config;
mod health;
mod manager;
#[cfg(feature = "migrations")]
mod migrations;

pub use config::{
    DEFAULT_ACQUIRE_TIMEOUT_SECS, DEFAULT_MAX_CONNECTIONS, DEFAULT_PORT, DatabaseKey,
    DatabasePrefix, PostgresConfig,
};
pub use health::check_health;
pub use manager::PoolManager;
#[cfg(feature = "migrations")]
pub use migrations::{migration_status, rollback_migrations, run_migrations};

// Re-export sqlx types for convenience
pub use sqlx::pool::PoolConnection;
pub use sqlx::{PgPool, Postgres};
