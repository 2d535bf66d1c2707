use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use sqlx::pool::PoolConnection;
use sqlx::{Connection, PgConnection, PgPool, Postgres};
use tracing::{debug, info, instrument};

use super::config::{DatabasePrefix, PostgresConfig};
use crate::common::{DatabaseError, DatabaseResult};

/// Owns one lazily created PostgreSQL pool for a configuration prefix.
///
/// The pool is built on the first call to [`PoolManager::pool`] and the same
/// instance is handed out until [`PoolManager::close`] runs. Building the
/// pool validates the prefix's environment variables but never touches the
/// network; connections are only opened by [`PoolManager::connect`].
///
/// # Example
///
/// ```ignore
/// use database::postgres::{DatabasePrefix, PoolManager};
///
/// let manager = PoolManager::new(DatabasePrefix::ServiceDb);
/// let conn = manager.connect().await?; // returned to the pool on drop
/// drop(conn);
/// manager.close().await;
/// ```
pub struct PoolManager {
    prefix: DatabasePrefix,
    pool: Mutex<Option<Arc<PgPool>>>,
}

impl PoolManager {
    pub fn new(prefix: DatabasePrefix) -> Self {
        Self {
            prefix,
            pool: Mutex::new(None),
        }
    }

    pub fn prefix(&self) -> DatabasePrefix {
        self.prefix
    }

    /// Return the memoized pool, creating it on first use.
    ///
    /// Fails with [`DatabaseError::Config`] naming the first missing
    /// `<PREFIX>_<KEY>` variable. The check-then-create runs under a lock so
    /// parallel first callers share one pool.
    pub fn pool(&self) -> DatabaseResult<Arc<PgPool>> {
        let mut slot = self.slot();
        if let Some(pool) = slot.as_ref() {
            return Ok(Arc::clone(pool));
        }

        let config = PostgresConfig::from_prefix(self.prefix)?;
        debug!(?config, "Creating PostgreSQL pool");

        let pool = Arc::new(config.pool_options().connect_lazy_with(config.connect_options()));
        *slot = Some(Arc::clone(&pool));

        info!(
            prefix = %self.prefix,
            host = %config.host,
            port = config.port,
            database = %config.database,
            "PostgreSQL pool created"
        );
        Ok(pool)
    }

    /// Whether a pool is currently memoized
    pub fn is_initialized(&self) -> bool {
        self.slot().is_some()
    }

    /// Check out one connection. Dropping it returns it to the pool.
    ///
    /// Network and authentication failures are returned unchanged; nothing
    /// is retried. While the pool holds no connections a direct connection is
    /// opened first, since the pool's acquire retries refused connections
    /// until its timeout and reports `PoolTimedOut` instead.
    #[instrument(skip(self), fields(prefix = %self.prefix))]
    pub async fn connect(&self) -> DatabaseResult<PoolConnection<Postgres>> {
        let pool = self.pool()?;
        if pool.size() == 0 {
            let direct = PgConnection::connect_with(&pool.connect_options())
                .await
                .map_err(DatabaseError::Connection)?;
            drop(direct);
        }
        let conn = pool.acquire().await.map_err(DatabaseError::Connection)?;
        debug!("Checked out PostgreSQL connection");
        Ok(conn)
    }

    /// Drain and close the pool, then forget it so the next [`PoolManager::pool`]
    /// builds a fresh one. No-op when no pool exists.
    pub async fn close(&self) {
        let current = self.slot().clone();
        let Some(pool) = current else {
            return;
        };

        pool.close().await;

        let mut slot = self.slot();
        if slot.as_ref().is_some_and(|p| Arc::ptr_eq(p, &pool)) {
            *slot = None;
        }
        info!(prefix = %self.prefix, "PostgreSQL pool closed");
    }

    fn slot(&self) -> MutexGuard<'_, Option<Arc<PgPool>>> {
        self.pool.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for PoolManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PoolManager")
            .field("prefix", &self.prefix)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}
