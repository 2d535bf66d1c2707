use crate::{env_or_default, ConfigError, FromEnv};
use std::net::Ipv4Addr;

pub const DEFAULT_API_PORT: u16 = 3000;
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

/// Server configuration for HTTP APIs
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Get the server address as "host:port"
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl FromEnv for ServerConfig {
    /// Reads from environment variables with defaults:
    /// - API_HOST: defaults to 0.0.0.0 (all interfaces)
    /// - API_PORT: defaults to 3000
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("API_HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        let port = match std::env::var("API_PORT") {
            Ok(raw) if !raw.is_empty() => {
                raw.parse().map_err(|e| ConfigError::ParseError {
                    key: "API_PORT".to_string(),
                    details: format!("{}", e),
                })?
            }
            _ => DEFAULT_API_PORT,
        };

        Ok(Self { host, port })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: Ipv4Addr::UNSPECIFIED.to_string(),
            port: DEFAULT_API_PORT,
        }
    }
}

/// Allowed browser origin for cross-origin requests
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CorsConfig {
    pub origin: String,
}

impl FromEnv for CorsConfig {
    /// CORS_ORIGIN: defaults to http://localhost:3000 when unset or empty
    fn from_env() -> Result<Self, ConfigError> {
        let origin = match std::env::var("CORS_ORIGIN") {
            Ok(origin) if !origin.is_empty() => origin,
            _ => DEFAULT_CORS_ORIGIN.to_string(),
        };
        Ok(Self { origin })
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_from_env_with_defaults() {
        temp_env::with_vars([("API_HOST", None::<&str>), ("API_PORT", None::<&str>)], || {
            let config = ServerConfig::from_env().unwrap();
            assert_eq!(config.host, "0.0.0.0");
            assert_eq!(config.port, 3000);
            assert_eq!(config.address(), "0.0.0.0:3000");
        });
    }

    #[test]
    fn test_server_config_from_env_with_custom_values() {
        temp_env::with_vars(
            [("API_HOST", Some("127.0.0.1")), ("API_PORT", Some("8081"))],
            || {
                let config = ServerConfig::from_env().unwrap();
                assert_eq!(config.address(), "127.0.0.1:8081");
            },
        );
    }

    #[test]
    fn test_server_config_from_env_invalid_port() {
        temp_env::with_var("API_PORT", Some("not_a_number"), || {
            let err = ServerConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("API_PORT"));
        });
    }

    #[test]
    fn test_server_config_from_env_port_out_of_range() {
        temp_env::with_var("API_PORT", Some("99999"), || {
            assert!(ServerConfig::from_env().is_err());
        });
    }

    #[test]
    fn test_cors_config_default_origin() {
        temp_env::with_var_unset("CORS_ORIGIN", || {
            assert_eq!(CorsConfig::from_env().unwrap(), CorsConfig::default());
        });
        temp_env::with_var("CORS_ORIGIN", Some(""), || {
            assert_eq!(CorsConfig::from_env().unwrap().origin, DEFAULT_CORS_ORIGIN);
        });
    }

    #[test]
    fn test_cors_config_custom_origin() {
        temp_env::with_var("CORS_ORIGIN", Some("https://chat.example.com"), || {
            assert_eq!(
                CorsConfig::from_env().unwrap().origin,
                "https://chat.example.com"
            );
        });
    }
}
