use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use schemars::{JsonSchema, schema_for};
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::storage::StorageConfig;
use crate::router::DEFAULT_LOGIN_PATH;

pub const DEFAULT_CONFIG_PATH: &str = "./config.yaml";
pub const ENV_PREFIX: &str = "AOA_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("error loading configuration: {0}")]
    Load(#[from] Box<figment::Error>),
    #[error("invalid logging.level '{0}'. Valid values: trace, debug, info, warn, error")]
    InvalidLogLevel(String),
    #[error("error rendering schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0. Every section may be omitted.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
#[serde(default)]
pub struct ConfigV1 {
    pub api: ApiConfig,
    pub storage: StorageConfig,
    pub navigation: NavigationConfig,
    pub logging: LoggingConfig,
}

/// The backend every dispatched path is resolved against.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_in_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            timeout_in_ms: 10_000,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(default)]
pub struct NavigationConfig {
    pub login_path: String,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            login_path: DEFAULT_LOGIN_PATH.to_string(),
        }
    }
}

fn figment_for(path: &Path) -> Figment {
    Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
}

/// Load config from a YAML file, overridden by `AOA_`-prefixed environment
/// variables (`AOA_API__BASE_URL` sets `api.base_url`). A missing file yields the defaults.
pub fn load_config(path: impl AsRef<Path>) -> Result<ConfigV1, ConfigError> {
    let config = figment_for(path.as_ref())
        .extract::<Config>()
        .map_err(Box::new)?;
    match config {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Parse config from YAML text only, ignoring the environment.
pub fn parse_config(yaml: &str) -> Result<ConfigV1, ConfigError> {
    let config = Figment::new()
        .merge(Serialized::default("version", "1.0.0"))
        .merge(Yaml::string(yaml))
        .extract::<Config>()
        .map_err(Box::new)?;
    match config {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Render the JSON schema for the configuration.
pub fn schema_json() -> Result<String, ConfigError> {
    let schema = schema_for!(Config);
    Ok(serde_json::to_string_pretty(&schema)?)
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() -> Result<(), ConfigError> {
    println!("{}", schema_json()?);
    Ok(())
}
