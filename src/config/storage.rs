use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::storage::FileStorageConfig;

pub const DEFAULT_SESSION_FILE: &str = ".aoa/session.json";

/// Where the session lives. We differentiate backends via a "type" tag in the YAML.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
#[serde(tag = "type")]
pub enum StorageConfig {
    #[serde(rename = "memory")]
    Memory,
    #[serde(rename = "file")]
    File(FileStorageConfig),
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::File(FileStorageConfig {
            path: DEFAULT_SESSION_FILE.into(),
        })
    }
}
