use std::collections::HashMap;
use std::sync::RwLock;

use super::KeyValueStorage;

/// Process-local storage. Useful for tests and for one-shot runs where the
/// session must not outlive the process.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        let entries = self
            .entries
            .read()
            .map_err(|e| format!("memory storage lock poisoned: {}", e))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| format!("memory storage lock poisoned: {}", e))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| format!("memory storage lock poisoned: {}", e))?;
        entries.remove(key);
        Ok(())
    }

    fn get_name(&self) -> &str {
        "memory"
    }
}
