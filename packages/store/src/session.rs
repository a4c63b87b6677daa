//! # Signed-in session persistence
//!
//! A [`Session`] is the client's view of who is signed in: the backend user id
//! (sent back as the identity header), the username, and the admin flag. It is
//! written at login, read by every protected page, and cleared at logout.
//!
//! Storage goes through the [`SessionStore`] key/value trait so the same
//! [`SessionService`] logic runs against browser `localStorage`
//! ([`crate::LocalStorageStore`]) or memory ([`crate::MemoryStore`]).
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `user_id` | decimal user id |
//! | `username` | username |
//! | `is_superuser` | `"true"` / `"false"` |
//!
//! A session is only considered present when `user_id` parses and `username`
//! is set. Partial leftovers are treated as signed out.

use serde::{Deserialize, Serialize};

pub const USER_ID_KEY: &str = "user_id";
pub const USERNAME_KEY: &str = "username";
pub const IS_ADMIN_KEY: &str = "is_superuser";

/// Signed-in user as known by the client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl Session {
    pub fn new(user_id: i64, username: impl Into<String>, is_admin: bool) -> Self {
        Self {
            user_id,
            username: username.into(),
            is_admin,
        }
    }

    /// Value of the per-request identity header.
    pub fn identity(&self) -> String {
        self.user_id.to_string()
    }
}

/// Synchronous string key/value storage.
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Typed read/write/clear operations over a [`SessionStore`].
#[derive(Clone, Debug, Default)]
pub struct SessionService<S: SessionStore> {
    store: S,
}

impl<S: SessionStore> SessionService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Read the persisted session, if a complete one exists.
    pub fn load(&self) -> Option<Session> {
        let user_id = self.store.get(USER_ID_KEY)?.trim().parse::<i64>().ok()?;
        let username = self.store.get(USERNAME_KEY).filter(|u| !u.is_empty())?;
        let is_admin = self
            .store
            .get(IS_ADMIN_KEY)
            .map(|v| v == "true")
            .unwrap_or(false);
        Some(Session {
            user_id,
            username,
            is_admin,
        })
    }

    pub fn save(&self, session: &Session) {
        self.store.set(USER_ID_KEY, &session.user_id.to_string());
        self.store.set(USERNAME_KEY, &session.username);
        self.store
            .set(IS_ADMIN_KEY, if session.is_admin { "true" } else { "false" });
    }

    pub fn clear(&self) {
        self.store.remove(USER_ID_KEY);
        self.store.remove(USERNAME_KEY);
        self.store.remove(IS_ADMIN_KEY);
    }

    /// Persist a new username for the current session after a profile edit.
    pub fn rename(&self, username: &str) -> Option<Session> {
        let mut session = self.load()?;
        if session.username != username {
            session.username = username.to_string();
            self.store.set(USERNAME_KEY, username);
        }
        Some(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    #[test]
    fn save_then_load() {
        let sessions = SessionService::new(MemoryStore::new());
        assert!(sessions.load().is_none());

        sessions.save(&Session::new(7, "alice", true));
        assert_eq!(sessions.load(), Some(Session::new(7, "alice", true)));
    }

    #[test]
    fn clear_removes_every_key() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(store.clone());
        sessions.save(&Session::new(3, "bob", false));

        sessions.clear();

        assert!(sessions.load().is_none());
        assert!(store.get(USER_ID_KEY).is_none());
        assert!(store.get(USERNAME_KEY).is_none());
        assert!(store.get(IS_ADMIN_KEY).is_none());
    }

    #[test]
    fn partial_or_garbled_entries_are_signed_out() {
        let store = MemoryStore::new();
        let sessions = SessionService::new(store.clone());

        store.set(USERNAME_KEY, "carol");
        assert!(sessions.load().is_none());

        store.set(USER_ID_KEY, "not-a-number");
        assert!(sessions.load().is_none());

        store.set(USER_ID_KEY, "12");
        let session = sessions.load().unwrap();
        assert_eq!(session.user_id, 12);
        assert!(!session.is_admin);
    }

    #[test]
    fn rename_updates_username_only() {
        let sessions = SessionService::new(MemoryStore::new());
        sessions.save(&Session::new(5, "dave", true));

        let renamed = sessions.rename("david").unwrap();
        assert_eq!(renamed, Session::new(5, "david", true));
        assert_eq!(sessions.load(), Some(renamed));
    }

    #[test]
    fn rename_without_session_is_none() {
        let sessions = SessionService::new(MemoryStore::new());
        assert!(sessions.rename("eve").is_none());
    }

    #[test]
    fn identity_is_decimal_id() {
        assert_eq!(Session::new(42, "x", false).identity(), "42");
    }
}
