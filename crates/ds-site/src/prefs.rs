//! Reader preference storage.
//!
//! Client-side state (the selected code-sample language) persists outside
//! this core. The composer depends only on the [`PreferenceStore`]
//! capability, never on a concrete global; hosts wire in whatever backs
//! their sessions.

use std::collections::HashMap;
use std::sync::Mutex;

/// Preference key for the selected code-sample language.
pub const LANGUAGE_KEY: &str = "language";

/// Keyed get/set store for reader preferences.
pub trait PreferenceStore: Send + Sync {
    /// Look up a stored value.
    fn get(&self, key: &str) -> Option<String>;

    /// Store a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);
}

/// In-memory [`PreferenceStore`], for tests and single-process hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
    }
}
