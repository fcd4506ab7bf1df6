use std::sync::Arc;

use tracing::{debug, error};

use crate::storage::KeyValueStorage;

pub const TOKEN_KEY: &str = "aoa_token";
pub const USERNAME_KEY: &str = "aoa_username";
/// Reported by `get_username` when nobody is signed in.
pub const GUEST_USERNAME: &str = "guest";

/// Fields to write with `SessionStore::set_auth`. `None` or empty fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthUpdate {
    pub token: Option<String>,
    pub username: Option<String>,
}

impl AuthUpdate {
    pub fn new(token: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: Some(username.into()),
        }
    }

    pub fn token(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            username: None,
        }
    }

    pub fn username(username: impl Into<String>) -> Self {
        Self {
            token: None,
            username: Some(username.into()),
        }
    }
}

/// The current auth token and display name, kept in a durable key/value storage.
///
/// None of the operations fail: storage errors are logged and reads fall back
/// to the empty token and the guest name. Each field is written independently,
/// so concurrent `set_auth`/`clear_auth` calls resolve as last write wins per field.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        debug!("Creating session store over '{}' storage", storage.get_name());
        Self { storage }
    }

    pub fn set_auth(&self, update: AuthUpdate) {
        if let Some(token) = update.token.filter(|t| !t.is_empty()) {
            self.write(TOKEN_KEY, &token);
        }
        if let Some(username) = update.username.filter(|u| !u.is_empty()) {
            self.write(USERNAME_KEY, &username);
        }
    }

    pub fn clear_auth(&self) {
        for key in [TOKEN_KEY, USERNAME_KEY] {
            if let Err(e) = self.storage.remove(key) {
                error!("Failed to remove '{}' from session storage: {}", key, e);
            }
        }
    }

    pub fn get_token(&self) -> String {
        self.read(TOKEN_KEY).unwrap_or_default()
    }

    pub fn get_username(&self) -> String {
        self.read(USERNAME_KEY)
            .unwrap_or_else(|| GUEST_USERNAME.to_string())
    }

    pub fn is_authenticated(&self) -> bool {
        !self.get_token().is_empty()
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value.filter(|v| !v.is_empty()),
            Err(e) => {
                error!("Failed to read '{}' from session storage: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.storage.set(key, value) {
            error!("Failed to write '{}' to session storage: {}", key, e);
        }
    }
}
