use std::sync::Arc;

use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::StorageConfig;

/// The KeyValueStorage trait abstracts the durable string map the session lives in.
///
/// Implementations must treat every call as a single, self-contained write or read:
/// there is no transaction spanning several keys.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, String>;
    fn set(&self, key: &str, value: &str) -> Result<(), String>;
    /// Removing an absent key succeeds.
    fn remove(&self, key: &str) -> Result<(), String>;
    fn get_name(&self) -> &str;
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Arc<dyn KeyValueStorage> {
    match config {
        StorageConfig::Memory => {
            info!("Using in-memory session storage; the session will not survive a restart.");
            Arc::new(MemoryStorage::new())
        }
        StorageConfig::File(file_config) => {
            info!(
                "Using file session storage at '{}'",
                file_config.path.display()
            );
            Arc::new(FileStorage::new(file_config))
        }
    }
}
