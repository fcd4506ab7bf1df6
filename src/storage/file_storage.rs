use std::collections::BTreeMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use super::KeyValueStorage;

/// The config needed for the file-backed storage.
#[derive(Deserialize, Serialize, Debug, JsonSchema, Clone)]
pub struct FileStorageConfig {
    pub path: PathBuf,
}

/// Stores every entry in one JSON object on disk.
///
/// The file is read on first access only. Every mutation writes a complete copy
/// to a temporary file and renames it over the old one; the in-memory map only
/// changes once that rename succeeded.
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<Option<BTreeMap<String, String>>>,
}

impl FileStorage {
    pub fn new(config: &FileStorageConfig) -> Self {
        Self {
            path: config.path.clone(),
            entries: Mutex::new(None),
        }
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut Option<BTreeMap<String, String>>) -> Result<T, String>,
    ) -> Result<T, String> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| format!("file storage lock poisoned: {}", e))?;
        if guard.is_none() {
            *guard = Some(read_entries(&self.path)?);
        }
        f(&mut guard)
    }

    /// Applies `change` to a copy of the entries, persists the copy, then swaps it in.
    fn mutate(
        &self,
        change: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), String> {
        self.with_entries(|cached| {
            let mut next = cached.clone().unwrap_or_default();
            if !change(&mut next) {
                return Ok(());
            }
            write_entries(&self.path, &next)?;
            *cached = Some(next);
            Ok(())
        })
    }
}

/// A missing or unreadable-as-JSON file counts as empty; the next write replaces it.
fn read_entries(path: &Path) -> Result<BTreeMap<String, String>, String> {
    match fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
        Ok(text) => match serde_json::from_str(&text) {
            Ok(entries) => {
                debug!("Loaded session storage from '{}'", path.display());
                Ok(entries)
            }
            Err(e) => {
                warn!(
                    "Discarding unparsable storage file '{}': {}",
                    path.display(),
                    e
                );
                Ok(BTreeMap::new())
            }
        },
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
        Err(e) => Err(format!(
            "Error reading storage file '{}': {}",
            path.display(),
            e
        )),
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), String> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| format!("Error creating '{}': {}", dir.display(), e))?;

    let text = serde_json::to_string_pretty(entries)
        .map_err(|e| format!("Error serialising storage: {}", e))?;
    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| format!("Error creating temp file in '{}': {}", dir.display(), e))?;
    file.write_all(text.as_bytes())
        .and_then(|_| file.as_file().sync_all())
        .map_err(|e| format!("Error writing '{}': {}", path.display(), e))?;
    file.persist(path)
        .map_err(|e| format!("Error writing '{}': {}", path.display(), e.error))?;
    Ok(())
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.with_entries(|cached| Ok(cached.as_ref().and_then(|e| e.get(key).cloned())))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), String> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.mutate(|entries| entries.remove(key).is_some())
    }

    fn get_name(&self) -> &str {
        "file"
    }
}
