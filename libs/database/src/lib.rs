//! Database library providing lazily created PostgreSQL pools
//!
//! Each [`postgres::PoolManager`] owns one pool whose connection settings
//! come from a prefixed set of environment variables (`SERVICE_DB_*`,
//! `SCRAPE_DB_*`). The pool is created on first use, reused until closed,
//! and recreated after [`postgres::PoolManager::close`].
//!
//! # Features
//!
//! - `postgres` (default) - PostgreSQL support with sqlx
//! - `migrations` - Run SeaORM migrators over a managed pool
//!
//! # Example
//!
//! ```ignore
//! use database::postgres::{DatabasePrefix, PoolManager, check_health};
//!
//! let manager = PoolManager::new(DatabasePrefix::ServiceDb);
//! let conn = manager.connect().await?;
//! drop(conn);
//!
//! check_health(&manager.pool()?).await?;
//! manager.close().await;
//! ```

pub mod common;

#[cfg(feature = "postgres")]
pub mod postgres;

pub use common::{DatabaseError, DatabaseResult};
