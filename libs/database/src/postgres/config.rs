use std::fmt;
use std::time::Duration;

use core_config::{env_parse_or, env_required, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::warn;

pub const DEFAULT_PORT: u16 = 5432;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 30;

/// Namespace for one set of PostgreSQL environment variables.
///
/// Each prefix owns five required keys: `<PREFIX>_HOST`, `<PREFIX>_PORT`,
/// `<PREFIX>_USER`, `<PREFIX>_PASSWORD` and `<PREFIX>_NAME`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DatabasePrefix {
    /// Application database (`SERVICE_DB_*`)
    ServiceDb,
    /// Scraped-content database (`SCRAPE_DB_*`)
    ScrapeDb,
}

impl DatabasePrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatabasePrefix::ServiceDb => "SERVICE_DB",
            DatabasePrefix::ScrapeDb => "SCRAPE_DB",
        }
    }

    /// Full environment variable name for `key`, e.g. `SERVICE_DB_HOST`
    pub fn var(&self, key: DatabaseKey) -> String {
        format!("{}_{}", self.as_str(), key.as_str())
    }
}

impl fmt::Display for DatabasePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The five required keys, in validation order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseKey {
    Host,
    Port,
    User,
    Password,
    Name,
}

impl DatabaseKey {
    pub const ALL: [DatabaseKey; 5] = [
        DatabaseKey::Host,
        DatabaseKey::Port,
        DatabaseKey::User,
        DatabaseKey::Password,
        DatabaseKey::Name,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatabaseKey::Host => "HOST",
            DatabaseKey::Port => "PORT",
            DatabaseKey::User => "USER",
            DatabaseKey::Password => "PASSWORD",
            DatabaseKey::Name => "NAME",
        }
    }
}

/// PostgreSQL connection and pool settings for one prefix
#[derive(Clone)]
pub struct PostgresConfig {
    pub prefix: DatabasePrefix,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// How long `connect()` waits for a free connection
    pub acquire_timeout_secs: u64,
}

impl PostgresConfig {
    /// Validate and load the configuration for `prefix` from the environment.
    ///
    /// Keys are resolved in the order HOST, PORT, USER, PASSWORD, NAME and
    /// the first absent or empty one fails the whole load. The port falls
    /// back to 5432 only when the variable is present but is not a non-zero
    /// port number.
    pub fn from_prefix(prefix: DatabasePrefix) -> Result<Self, ConfigError> {
        let host = env_required(&prefix.var(DatabaseKey::Host))?;
        let raw_port = env_required(&prefix.var(DatabaseKey::Port))?;
        let user = env_required(&prefix.var(DatabaseKey::User))?;
        let password = env_required(&prefix.var(DatabaseKey::Password))?;
        let database = env_required(&prefix.var(DatabaseKey::Name))?;

        let port = coerce_port(&raw_port).unwrap_or_else(|| {
            warn!(
                %prefix,
                value = %raw_port,
                "Port is not a valid number, falling back to {}",
                DEFAULT_PORT
            );
            DEFAULT_PORT
        });

        let max_connections = env_parse_or(
            &format!("{}_MAX_CONNECTIONS", prefix),
            DEFAULT_MAX_CONNECTIONS,
        )?;
        let acquire_timeout_secs = env_parse_or(
            &format!("{}_ACQUIRE_TIMEOUT_SECS", prefix),
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
        )?;

        Ok(Self {
            prefix,
            host,
            port,
            user,
            password,
            database,
            max_connections,
            acquire_timeout_secs,
        })
    }

    /// sqlx connect options for a single connection
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
    }

    /// Pool options. `min_connections` stays at zero so building the pool
    /// never opens a connection on its own.
    pub fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(0)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

impl fmt::Debug for PostgresConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresConfig")
            .field("prefix", &self.prefix)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .field("max_connections", &self.max_connections)
            .field("acquire_timeout_secs", &self.acquire_timeout_secs)
            .finish()
    }
}

fn coerce_port(raw: &str) -> Option<u16> {
    raw.trim().parse::<u16>().ok().filter(|port| *port != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(prefix: &str) -> Vec<(String, Option<&'static str>)> {
        vec![
            (format!("{prefix}_HOST"), Some("db.internal")),
            (format!("{prefix}_PORT"), Some("6543")),
            (format!("{prefix}_USER"), Some("chatbot")),
            (format!("{prefix}_PASSWORD"), Some("s3cret")),
            (format!("{prefix}_NAME"), Some("chatbot")),
        ]
    }

    #[test]
    fn test_prefix_var_names() {
        assert_eq!(DatabasePrefix::ServiceDb.var(DatabaseKey::Host), "SERVICE_DB_HOST");
        assert_eq!(DatabasePrefix::ScrapeDb.var(DatabaseKey::Name), "SCRAPE_DB_NAME");
        assert_eq!(DatabasePrefix::ScrapeDb.to_string(), "SCRAPE_DB");
    }

    #[test]
    fn test_from_prefix_success() {
        temp_env::with_vars(full_env("SERVICE_DB"), || {
            let config = PostgresConfig::from_prefix(DatabasePrefix::ServiceDb).unwrap();
            assert_eq!(config.host, "db.internal");
            assert_eq!(config.port, 6543);
            assert_eq!(config.user, "chatbot");
            assert_eq!(config.password, "s3cret");
            assert_eq!(config.database, "chatbot");
            assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
            assert_eq!(config.acquire_timeout_secs, DEFAULT_ACQUIRE_TIMEOUT_SECS);
        });
    }

    #[test]
    fn test_from_prefix_reports_each_missing_key() {
        for key in DatabaseKey::ALL {
            let missing = DatabasePrefix::ScrapeDb.var(key);
            let vars: Vec<_> = full_env("SCRAPE_DB")
                .into_iter()
                .map(|(name, value)| {
                    let value = if name == missing { None } else { value };
                    (name, value)
                })
                .collect();

            temp_env::with_vars(vars, || {
                let err = PostgresConfig::from_prefix(DatabasePrefix::ScrapeDb).unwrap_err();
                assert_eq!(err, ConfigError::MissingEnvVar(missing.clone()));
                assert!(err.to_string().contains(&missing));
            });
        }
    }

    #[test]
    fn test_from_prefix_first_missing_key_wins() {
        temp_env::with_vars(
            [
                ("SERVICE_DB_HOST", Some("localhost")),
                ("SERVICE_DB_PORT", Some("5432")),
                ("SERVICE_DB_USER", None),
                ("SERVICE_DB_PASSWORD", None),
                ("SERVICE_DB_NAME", None),
            ],
            || {
                let err = PostgresConfig::from_prefix(DatabasePrefix::ServiceDb).unwrap_err();
                assert_eq!(err.key(), "SERVICE_DB_USER");
            },
        );
    }

    #[test]
    fn test_empty_value_counts_as_missing() {
        let mut vars = full_env("SERVICE_DB");
        vars[3].1 = Some("");
        temp_env::with_vars(vars, || {
            let err = PostgresConfig::from_prefix(DatabasePrefix::ServiceDb).unwrap_err();
            assert_eq!(err.key(), "SERVICE_DB_PASSWORD");
        });
    }

    #[test]
    fn test_unparseable_port_falls_back_to_default() {
        for raw in ["not-a-port", "0", "70000"] {
            let mut vars = full_env("SERVICE_DB");
            vars[1].1 = Some(raw);
            temp_env::with_vars(vars, || {
                let config = PostgresConfig::from_prefix(DatabasePrefix::ServiceDb).unwrap();
                assert_eq!(config.port, DEFAULT_PORT, "raw port {raw:?}");
            });
        }
    }

    #[test]
    fn test_absent_port_is_still_fatal() {
        let mut vars = full_env("SERVICE_DB");
        vars[1].1 = None;
        temp_env::with_vars(vars, || {
            let err = PostgresConfig::from_prefix(DatabasePrefix::ServiceDb).unwrap_err();
            assert_eq!(err.key(), "SERVICE_DB_PORT");
        });
    }

    #[test]
    fn test_pool_tuning_overrides() {
        let mut vars = full_env("SCRAPE_DB");
        vars.push(("SCRAPE_DB_MAX_CONNECTIONS".into(), Some("25")));
        vars.push(("SCRAPE_DB_ACQUIRE_TIMEOUT_SECS".into(), Some("3")));
        temp_env::with_vars(vars, || {
            let config = PostgresConfig::from_prefix(DatabasePrefix::ScrapeDb).unwrap();
            assert_eq!(config.max_connections, 25);
            assert_eq!(config.acquire_timeout_secs, 3);
        });
    }

    #[test]
    fn test_pool_tuning_invalid_value() {
        let mut vars = full_env("SCRAPE_DB");
        vars.push(("SCRAPE_DB_MAX_CONNECTIONS".into(), Some("lots")));
        temp_env::with_vars(vars, || {
            let err = PostgresConfig::from_prefix(DatabasePrefix::ScrapeDb).unwrap_err();
            assert_eq!(err.key(), "SCRAPE_DB_MAX_CONNECTIONS");
        });
    }

    #[test]
    fn test_debug_redacts_password() {
        temp_env::with_vars(full_env("SERVICE_DB"), || {
            let config = PostgresConfig::from_prefix(DatabasePrefix::ServiceDb).unwrap();
            let debug = format!("{config:?}");
            assert!(!debug.contains("s3cret"));
            assert!(debug.contains("db.internal"));
        });
    }
}
