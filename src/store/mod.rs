//! Record store abstraction
//!
//! Credentials and watchlists are both small keyed tables of string records.
//! Backends implement [`RecordStore`]; the typed stores in [`credentials`] and
//! [`watchlist`] are written against the trait only.
use std::{fmt::Display, path::Path, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    config::{Config, StoreBackend},
    error::AppResult,
};

pub mod credentials;
pub mod embedded;
pub mod file;
pub mod watchlist;

pub use credentials::CredentialStore;
pub use file::FileStore;
pub use embedded::SledStore;
pub use watchlist::WatchlistStore;

/// A named table inside a record store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Table {
    /// username → password
    Credentials,
    /// movie_id → entry, one table per user
    Watchlist(String),
}

impl Display for Table {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Table::Credentials => write!(f, "credentials"),
            Table::Watchlist(username) => write!(f, "watchlist:{}", username),
        }
    }
}

/// One keyed record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub key: String,
    pub value: String,
}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Keyed record storage with insertion-ordered scans
///
/// A table that was never created reads as empty; callers that need to tell
/// the difference use [`RecordStore::table_exists`].
pub trait RecordStore: Send + Sync {
    /// Whether the table has been created
    fn table_exists(&self, table: &Table) -> AppResult<bool>;

    /// Creates the table, emptying it if it already exists
    fn create_table(&self, table: &Table) -> AppResult<()>;

    /// Value of the first record with this key
    fn get(&self, table: &Table, key: &str) -> AppResult<Option<String>>;

    /// Replaces the value of the first record with this key in place, or
    /// appends a new record
    fn put(&self, table: &Table, key: &str, value: &str) -> AppResult<()>;

    /// Appends a record even if the key is already present
    ///
    /// Earlier records keep precedence in [`RecordStore::get`].
    fn append(&self, table: &Table, key: &str, value: &str) -> AppResult<()>;

    /// Appends a record only if the key is absent; returns whether it did
    ///
    /// The check and the write are one atomic step.
    fn insert_new(&self, table: &Table, key: &str, value: &str) -> AppResult<bool>;

    /// Removes every record with this key; returns whether any existed
    fn delete(&self, table: &Table, key: &str) -> AppResult<bool>;

    /// Removes every record with this key, or appends one if there was none
    ///
    /// Returns `true` when the record was appended. The check and the write
    /// are one atomic step.
    fn toggle(&self, table: &Table, key: &str, value: &str) -> AppResult<bool>;

    /// All records in insertion order
    fn scan(&self, table: &Table) -> AppResult<Vec<Record>>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Opens the backend selected in the configuration
pub fn open_store(config: &Config) -> AppResult<Arc<dyn RecordStore>> {
    let root = Path::new(&config.data_dir);
    let store: Arc<dyn RecordStore> = match config.store_backend {
        StoreBackend::File => Arc::new(FileStore::open(root)?),
        StoreBackend::Sled => Arc::new(SledStore::open(root)?),
    };

    tracing::info!(
        backend = store.name(),
        data_dir = %config.data_dir,
        "Record store opened"
    );

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_display() {
        assert_eq!(Table::Credentials.to_string(), "credentials");
        assert_eq!(
            Table::Watchlist("sample".to_string()).to_string(),
            "watchlist:sample"
        );
    }
}
