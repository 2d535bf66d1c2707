//! Pool manager tests against a real PostgreSQL container
//!
//! These need Docker: `cargo test -p database -- --ignored`

use std::sync::Arc;

use database::postgres::{DatabasePrefix, PoolManager, check_health};
use test_utils::TestDatabase;

#[tokio::test]
#[ignore = "requires docker"]
async fn test_connect_checks_out_a_working_connection() {
    let db = TestDatabase::new().await;
    let manager = PoolManager::new(DatabasePrefix::ServiceDb);
    temp_env::with_vars(db.env_vars("SERVICE_DB"), || manager.pool().unwrap());

    let mut conn = manager.connect().await.unwrap();
    let (one,): (i32,) = sqlx::query_as("SELECT 1").fetch_one(&mut *conn).await.unwrap();
    assert_eq!(one, 1);
    drop(conn);

    check_health(&manager.pool().unwrap()).await.unwrap();
    manager.close().await;
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_reconnects_after_close() {
    let db = TestDatabase::new().await;
    let manager = PoolManager::new(DatabasePrefix::ScrapeDb);

    let first = temp_env::with_vars(db.env_vars("SCRAPE_DB"), || manager.pool().unwrap());
    drop(manager.connect().await.unwrap());
    manager.close().await;

    let second = temp_env::with_vars(db.env_vars("SCRAPE_DB"), || manager.pool().unwrap());
    assert!(!Arc::ptr_eq(&first, &second));
    drop(manager.connect().await.unwrap());
    manager.close().await;
}

#[tokio::test]
#[ignore = "requires docker"]
async fn test_wrong_password_is_propagated() {
    let db = TestDatabase::new().await;
    let manager = PoolManager::new(DatabasePrefix::ServiceDb);

    let mut vars = db.env_vars("SERVICE_DB");
    vars[3].1 = Some("wrong".to_string());
    vars.push(("SERVICE_DB_ACQUIRE_TIMEOUT_SECS".to_string(), Some("3".to_string())));
    temp_env::with_vars(vars, || manager.pool().unwrap());

    let err = manager.connect().await.unwrap_err();
    assert!(!err.is_config());
}
