//! # localStorage session store: browser-side persistence
//!
//! [`LocalStorageStore`] is the [`SessionStore`] used on the **web platform**.
//! Keys are written under an optional prefix so several clients on the same
//! origin do not collide.
//!
//! ## Error handling
//!
//! Storage can be unavailable (private browsing, disabled cookies) or throw on
//! quota. Reads then return `None` and writes are dropped with a warning, so an
//! unusable store degrades to "signed out" instead of breaking the page.

use web_sys::Storage;

use crate::session::SessionStore;

/// `window.localStorage`-backed SessionStore.
#[derive(Clone, Debug, Default)]
pub struct LocalStorageStore {
    prefix: String,
}

impl LocalStorageStore {
    /// Store keys unprefixed, matching what earlier builds of the client wrote.
    pub fn new() -> Self {
        Self::with_prefix("")
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    fn storage(&self) -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    fn key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl SessionStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(&self.key(key)).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!("localStorage unavailable, session not persisted");
            return;
        };
        if let Err(e) = storage.set_item(&self.key(key), value) {
            tracing::warn!("Failed to write {}: {:?}", key, e);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(&self.key(key));
        }
    }
}
