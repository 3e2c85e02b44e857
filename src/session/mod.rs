//! Session reader and writer over persistent browser storage.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every other component consumes [`Session::read`]. Only the login flow
//! writes a session ([`Session::persist`]) and only logout clears one
//! ([`Session::clear`]).
//!
//! DESIGN
//! ======
//! The record is rebuilt on every read rather than cached, so storage edits
//! made by other tabs or by the user are picked up on the next check.


pub mod record;
pub mod store;

pub use record::{ADMIN_ROLE, DEFAULT_LOGIN_ROLE, GUEST_ROLE, SessionRecord};
#[cfg(feature = "hydrate")]
pub use store::LocalStore;
pub use store::{MemoryStore, SessionStore};

use crate::config::StorageKeys;

/// Typed access to the three session keys of a [`SessionStore`].
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    keys: StorageKeys,
}

impl<S: SessionStore> Session<S> {
    pub fn new(store: S, keys: StorageKeys) -> Self {
        Self { store, keys }
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read the current session, applying defaults for absent keys.
    ///
    /// Empty stored values are treated as absent: an empty role reads as
    /// `"guest"` and an empty token as no token.
    pub fn read(&self) -> SessionRecord {
        let token = self.non_empty(&self.keys.token);
        let role = self
            .non_empty(&self.keys.role)
            .unwrap_or_else(|| GUEST_ROLE.to_owned());
        let username = self.store.get_item(&self.keys.username).unwrap_or_default();
        SessionRecord {
            token,
            role,
            username,
        }
    }

    /// Remove all three session keys.
    pub fn clear(&self) {
        for key in self.keys.all() {
            self.store.remove_item(key);
        }
    }

    /// Write `record` to storage. A `None` token removes the token key.
    pub fn persist(&self, record: &SessionRecord) {
        match record.token.as_deref() {
            Some(token) => self.store.set_item(&self.keys.token, token),
            None => self.store.remove_item(&self.keys.token),
        }
        self.store.set_item(&self.keys.role, &record.role);
        self.store.set_item(&self.keys.username, &record.username);
    }

    fn non_empty(&self, key: &str) -> Option<String> {
        self.store.get_item(key).filter(|v| !v.is_empty())
    }
}
