use core_config::{
    FromEnv,
    server::{CorsConfig, ServerConfig},
};

pub use core_config::Environment;

/// Application configuration composed from the shared config components.
///
/// Database settings are not read here: each pool manager resolves its own
/// prefix on first use.
#[derive(Clone, Debug)]
pub struct Config {
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=3000 by default
        let cors = CorsConfig::from_env()?;

        Ok(Self {
            server,
            cors,
            environment,
        })
    }
}
