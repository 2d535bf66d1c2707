//! Shared test utilities
//!
//! - `TestDatabase`: PostgreSQL container with automatic cleanup (feature: "postgres")
//!
//! # Usage
//!
//! ```ignore
//! use test_utils::TestDatabase;
//!
//! #[tokio::test]
//! async fn my_postgres_test() {
//!     let db = TestDatabase::new().await;
//!     let vars = db.env_vars("SERVICE_DB");
//!     temp_env::with_vars(vars, || { /* build a PoolManager here */ });
//! }
//! ```

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;
