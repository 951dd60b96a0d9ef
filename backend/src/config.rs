use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub database: DatabaseConfig,
    pub storage: StorageConfig,
    pub classify: ClassifyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding the built UI bundle. Unset means API only.
    #[serde(default)]
    pub static_dir: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub url: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub public_url: String,
    pub bucket: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClassifyConfig {
    pub tick_interval_ms: u64,
    pub progress_step: u8,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());
        Self::load_from(Path::new("config"), &environment)
    }

    /// Layers `<dir>/default`, then `<dir>/<environment>`, then `APP__*` variables.
    pub fn load_from(dir: &Path, environment: &str) -> Result<Self, ConfigError> {
        let default = dir.join("default");
        let overlay = dir.join(environment);

        Config::builder()
            .add_source(File::with_name(&default.to_string_lossy()))
            .add_source(File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()
    }
}
