//! PostgreSQL test infrastructure
//!
//! Starts a disposable PostgreSQL container and exposes its connection
//! settings in the `<PREFIX>_HOST/PORT/USER/PASSWORD/NAME` shape the pool
//! managers read.

use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;

/// Test database wrapper that ensures proper cleanup
///
/// The container is stopped and removed when this struct is dropped.
pub struct TestDatabase {
    #[allow(dead_code)]
    container: ContainerAsync<Postgres>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let container = Postgres::default()
            .with_tag("17-alpine")
            .start()
            .await
            .expect("Failed to start Postgres container");

        let port = container
            .get_host_port_ipv4(5432)
            .await
            .expect("Failed to get host port");

        tracing::info!(port, "Test database ready");

        Self {
            container,
            host: "127.0.0.1".to_string(),
            port,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "postgres".to_string(),
        }
    }

    /// Environment variables pointing `prefix` (e.g. `SERVICE_DB`) at this container
    pub fn env_vars(&self, prefix: &str) -> Vec<(String, Option<String>)> {
        vec![
            (format!("{prefix}_HOST"), Some(self.host.clone())),
            (format!("{prefix}_PORT"), Some(self.port.to_string())),
            (format!("{prefix}_USER"), Some(self.user.clone())),
            (format!("{prefix}_PASSWORD"), Some(self.password.clone())),
            (format!("{prefix}_NAME"), Some(self.name.clone())),
        ]
    }
}
