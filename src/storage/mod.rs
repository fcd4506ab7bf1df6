pub mod base;
pub mod file_storage;
pub mod memory_storage;

// Re-export the primary storage items so code outside can do
// "use crate::storage::{KeyValueStorage, create_storage};"
pub use base::{KeyValueStorage, create_storage};
pub use file_storage::{FileStorage, FileStorageConfig};
pub use memory_storage::MemoryStorage;
