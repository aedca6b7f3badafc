//! Configuration management for the Scolaris client

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL for the REST endpoint, e.g. `https://library.example.org/api`
    pub rest_url: String,
    /// URL for the GraphQL endpoint
    pub graphql_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Path of the JSON file holding the persisted session
    pub token_file: PathBuf,
    /// Session lifetime granted at login, in hours
    pub ttl_hours: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ListConfig {
    /// Page size used by catalog list views
    pub books_per_page: usize,
    /// Page size used by patron list views
    pub patrons_per_page: usize,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub lists: ListConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default"))
            // Layer on the environment-specific file
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Add environment variables (with prefix SCOLARIS_)
            .add_source(
                Environment::with_prefix("SCOLARIS")
                    .separator("_")
                    .try_parsing(true),
            )
            // Override backend URLs from env vars if present
            .set_override_option("backend.rest_url", env::var("SCOLARIS_REST_URL").ok())?
            .set_override_option("backend.graphql_url", env::var("SCOLARIS_GRAPHQL_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            rest_url: "http://localhost:4000/api".to_string(),
            graphql_url: "http://localhost:4000/graphql".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_file: PathBuf::from(".scolaris-session.json"),
            ttl_hours: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            books_per_page: 10,
            patrons_per_page: 20,
        }
    }
}
