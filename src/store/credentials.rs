use std::sync::Arc;

use crate::{
    error::AppResult,
    store::{RecordStore, Table},
};

/// Username → plaintext password lookup table
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn RecordStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Stored password for `username`, or `None` if the user was never added
    pub fn find_user(&self, username: &str) -> AppResult<Option<String>> {
        self.store.get(&Table::Credentials, username)
    }

    /// Appends a credential record
    ///
    /// Performs no uniqueness check; callers confirm absence with
    /// [`CredentialStore::find_user`] first. A repeated username never
    /// shadows the first record.
    pub fn add_user(&self, username: &str, password: &str) -> AppResult<()> {
        self.store.append(&Table::Credentials, username, password)?;
        tracing::info!(username = %username, backend = self.store.name(), "User added");
        Ok(())
    }

    /// Adds the user only if the name is free; returns whether it was added
    pub fn add_new_user(&self, username: &str, password: &str) -> AppResult<bool> {
        let added = self
            .store
            .insert_new(&Table::Credentials, username, password)?;
        if added {
            tracing::info!(username = %username, backend = self.store.name(), "User added");
        }
        Ok(added)
    }

    /// Drops a credential whose registration could not be completed
    pub(crate) fn remove_user(&self, username: &str) -> AppResult<()> {
        self.store.delete(&Table::Credentials, username)?;
        tracing::warn!(username = %username, "Credential rolled back");
        Ok(())
    }
}
