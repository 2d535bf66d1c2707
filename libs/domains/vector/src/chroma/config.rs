use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};

pub const DEFAULT_CHROMA_URL: &str = "http://localhost:8000";
pub const DEFAULT_TENANT: &str = "default_tenant";
pub const DEFAULT_DATABASE: &str = "default_database";

/// Chroma server connection configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromaConfig {
    pub url: String,
    pub tenant: String,
    pub database: String,
    pub timeout_secs: u64,
}

impl ChromaConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_tenant(mut self, tenant: impl Into<String>, database: impl Into<String>) -> Self {
        self.tenant = tenant.into();
        self.database = database.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Base URL of the collection endpoints for the configured tenant and database
    pub fn collections_url(&self) -> String {
        format!(
            "{}/api/v2/tenants/{}/databases/{}/collections",
            self.url.trim_end_matches('/'),
            urlencoding::encode(&self.tenant),
            urlencoding::encode(&self.database)
        )
    }
}

impl Default for ChromaConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_CHROMA_URL.to_string(),
            tenant: DEFAULT_TENANT.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            timeout_secs: 30,
        }
    }
}

impl FromEnv for ChromaConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_or_default("CHROMA_URL", DEFAULT_CHROMA_URL),
            tenant: env_or_default("CHROMA_TENANT", DEFAULT_TENANT),
            database: env_or_default("CHROMA_DATABASE", DEFAULT_DATABASE),
            timeout_secs: env_parse_or("CHROMA_TIMEOUT_SECS", 30)?,
        })
    }
}
