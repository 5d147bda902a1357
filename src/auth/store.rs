//! Durable token storage.
//!
//! DESIGN
//! ======
//! The session only needs get/set/remove of named strings, so that is the
//! whole trait. Two implementations: an in-memory map for tests and
//! ephemeral sessions, and a JSON-file store for clients that should stay
//! logged in across restarts.
//!
//! TRADE-OFFS
//! ==========
//! The file store rewrites the whole map on every mutation. Token writes are
//! rare (login, refresh, logout) and the map holds two short strings, so
//! simplicity wins over incremental IO.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Storage key for the short-lived bearer credential.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Storage key for the long-lived rotation credential.
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Durable key/value storage for credentials.
pub trait TokenStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str);
    /// Remove the value stored under `key`. Missing keys are not an error.
    fn remove(&self, key: &str);
}

// =============================================================================
// MEMORY STORE
// =============================================================================

/// Process-local token store. Contents are lost on drop.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("token store poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("token store poisoned")
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().expect("token store poisoned").remove(key);
    }
}

// =============================================================================
// FILE STORE
// =============================================================================

/// Token store persisted as a JSON object in a single file.
#[derive(Debug)]
pub struct FileTokenStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Open a store at `path`, loading any existing contents. A missing or
    /// unreadable file starts empty rather than failing: a corrupt token
    /// file is equivalent to being logged out.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, entries: Mutex::new(entries) }
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let raw = match serde_json::to_string(entries) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "token store serialize failed");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, raw) {
            tracing::warn!(error = %e, path = %self.path.display(), "token store write failed");
        }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("token store poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("token store poisoned");
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("token store poisoned");
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
