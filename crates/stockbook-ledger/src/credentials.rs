//! Username/password gate in front of the ledger.
//!
//! Passwords are stored and compared as plaintext, matching the legacy
//! `users.json` format.

use indexmap::IndexMap;

use stockbook_storage::{Collection, SnapshotStore};

use crate::error::LedgerError;

/// Username → password.
pub type CredentialMap = IndexMap<String, String>;

/// Account written to a fresh `users.json` on first run.
pub const DEFAULT_ADMIN: (&str, &str) = ("admin", "password");

/// Credential service over the `Users` collection.
///
/// Holds no cached copy: every call reads the current snapshot, so accounts
/// registered by another handle are visible immediately.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    store: S,
}

impl<S: SnapshotStore> CredentialStore<S> {
    pub fn new(store: S) -> Self {
        CredentialStore { store }
    }

    /// Writes the default admin account if no credential snapshot exists.
    ///
    /// Returns true if the snapshot was created.
    pub fn seed_default(&mut self) -> Result<bool, LedgerError> {
        if self.store.contains(Collection::Users)? {
            return Ok(false);
        }
        let (user, pass) = DEFAULT_ADMIN;
        let mut users = CredentialMap::new();
        users.insert(user.to_string(), pass.to_string());
        self.store.save(Collection::Users, &users)?;
        tracing::info!(user, "seeded default credentials");
        Ok(true)
    }

    /// True iff `user` exists and its stored password equals `pass` exactly.
    pub fn authenticate(&self, user: &str, pass: &str) -> Result<bool, LedgerError> {
        let users: CredentialMap = self.store.load(Collection::Users)?;
        let ok = users.get(user).is_some_and(|stored| stored == pass);
        if !ok {
            tracing::warn!(user, "authentication failed");
        }
        Ok(ok)
    }

    /// Adds a new account. Fails if `user` is already registered.
    pub fn register(&mut self, user: &str, pass: &str) -> Result<(), LedgerError> {
        let mut users: CredentialMap = self.store.load(Collection::Users)?;
        if users.contains_key(user) {
            return Err(LedgerError::UserExists(user.to_string()));
        }
        users.insert(user.to_string(), pass.to_string());
        self.store.save(Collection::Users, &users)?;
        tracing::info!(user, "user registered");
        Ok(())
    }
}
