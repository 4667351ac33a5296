use std::sync::Arc;

use crate::{
    error::{AppError, AppResult},
    models::{ToggleOutcome, WatchlistEntry},
    store::{RecordStore, Table},
};

/// Per-user watchlists, one table per username keyed by movie id
#[derive(Clone)]
pub struct WatchlistStore {
    store: Arc<dyn RecordStore>,
}

impl WatchlistStore {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    fn table(username: &str) -> Table {
        Table::Watchlist(username.to_string())
    }

    fn ensure_exists(&self, table: &Table, username: &str) -> AppResult<()> {
        if self.store.table_exists(table)? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!(
                "No watchlist exists for user {}",
                username
            )))
        }
    }

    /// Creates an empty watchlist, discarding any list left under this name
    pub fn create(&self, username: &str) -> AppResult<()> {
        self.store.create_table(&Self::table(username))
    }

    /// Every entry in insertion order
    ///
    /// The list must have been created at registration; a missing list is an
    /// error, not an empty result.
    pub fn read_all(&self, username: &str) -> AppResult<Vec<WatchlistEntry>> {
        let table = Self::table(username);
        self.ensure_exists(&table, username)?;

        let mut entries = Vec::new();
        for record in self.store.scan(&table)? {
            match WatchlistEntry::from_record(&record.key, &record.value) {
                Some(entry) => entries.push(entry),
                None => tracing::warn!(
                    username = %username,
                    movie_id = %record.key,
                    "Skipping malformed watchlist entry"
                ),
            }
        }

        Ok(entries)
    }

    /// Whether a movie is on the user's list
    pub fn contains(&self, username: &str, movie_id: &str) -> AppResult<bool> {
        let table = Self::table(username);
        self.ensure_exists(&table, username)?;
        Ok(self.store.get(&table, movie_id)?.is_some())
    }

    /// Removes the movie if it is listed, otherwise appends it
    ///
    /// Presence is decided by movie id, so an entry captured under a different
    /// title is still removed.
    pub fn toggle(&self, username: &str, entry: &WatchlistEntry) -> AppResult<ToggleOutcome> {
        entry.validate()?;
        let table = Self::table(username);
        self.ensure_exists(&table, username)?;

        let outcome = if self.store.toggle(&table, &entry.movie_id, &entry.to_value())? {
            ToggleOutcome::Added
        } else {
            ToggleOutcome::Removed
        };

        tracing::info!(
            username = %username,
            movie_id = %entry.movie_id,
            outcome = %outcome,
            "Watchlist toggled"
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileStore, SledStore};
    use tempfile::TempDir;

    fn file_backed() -> (TempDir, WatchlistStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        (dir, WatchlistStore::new(Arc::new(store)))
    }

    fn sled_backed() -> WatchlistStore {
        let db = sled::Config::new().temporary(true).open().unwrap();
        WatchlistStore::new(Arc::new(SledStore::new(db)))
    }

    fn entry(id: &str, title: &str) -> WatchlistEntry {
        WatchlistEntry::new(id, title, format!("http://img.example/{}.jpg", id))
    }

    #[test]
    fn test_missing_watchlist_is_an_error() {
        let (_dir, lists) = file_backed();
        assert!(matches!(lists.read_all("sample"), Err(AppError::NotFound(_))));
        assert!(matches!(
            lists.toggle("sample", &entry("tt001", "X")),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_toggle_add_then_remove() {
        let (_dir, lists) = file_backed();
        lists.create("sample").unwrap();
        assert!(lists.read_all("sample").unwrap().is_empty());

        let x = entry("tt001", "X");
        assert_eq!(lists.toggle("sample", &x).unwrap(), ToggleOutcome::Added);
        assert_eq!(lists.read_all("sample").unwrap(), vec![x.clone()]);

        assert_eq!(lists.toggle("sample", &x).unwrap(), ToggleOutcome::Removed);
        assert!(lists.read_all("sample").unwrap().is_empty());
    }

    #[test]
    fn test_double_toggle_restores_original_list() {
        let (_dir, lists) = file_backed();
        lists.create("sample").unwrap();
        let a = entry("tt1", "A");
        let b = entry("tt2", "B");
        let c = entry("tt3", "C");
        lists.toggle("sample", &a).unwrap();
        lists.toggle("sample", &b).unwrap();
        let original = lists.read_all("sample").unwrap();

        // Absent entry: add then remove
        lists.toggle("sample", &c).unwrap();
        lists.toggle("sample", &c).unwrap();
        assert_eq!(lists.read_all("sample").unwrap(), original);

        // Present last entry: remove then add puts it back at the end
        lists.toggle("sample", &b).unwrap();
        lists.toggle("sample", &b).unwrap();
        assert_eq!(lists.read_all("sample").unwrap(), original);
    }

    #[test]
    fn test_added_entry_appears_once() {
        let (_dir, lists) = file_backed();
        lists.create("sample").unwrap();
        lists.toggle("sample", &entry("tt1", "A")).unwrap();
        lists.toggle("sample", &entry("tt2", "B")).unwrap();

        let all = lists.read_all("sample").unwrap();
        assert_eq!(all.iter().filter(|e| e.movie_id == "tt2").count(), 1);
        assert!(lists.contains("sample", "tt2").unwrap());
        assert!(!lists.contains("sample", "tt3").unwrap());
    }

    #[test]
    fn test_same_id_different_title_is_removed() {
        let (_dir, lists) = file_backed();
        lists.create("sample").unwrap();
        lists.toggle("sample", &entry("tt1", "Alien")).unwrap();

        let outcome = lists.toggle("sample", &entry("tt1", "Alien (1979)")).unwrap();
        assert_eq!(outcome, ToggleOutcome::Removed);
        assert!(lists.read_all("sample").unwrap().is_empty());
    }

    #[test]
    fn test_reads_legacy_file_format() {
        let (dir, lists) = file_backed();
        std::fs::write(
            dir.path().join("sample.txt"),
            "tt0111161|The Shawshank Redemption (1994)|http://img/1.jpg\nbroken\n",
        )
        .unwrap();

        let all = lists.read_all("sample").unwrap();
        assert_eq!(
            all,
            vec![WatchlistEntry::new(
                "tt0111161",
                "The Shawshank Redemption (1994)",
                "http://img/1.jpg"
            )]
        );
    }

    #[test]
    fn test_writes_legacy_file_format() {
        let (dir, lists) = file_backed();
        lists.create("sample").unwrap();
        lists
            .toggle("sample", &WatchlistEntry::new("tt001", "X", "http://img/x.jpg"))
            .unwrap();

        let contents = std::fs::read_to_string(dir.path().join("sample.txt")).unwrap();
        assert_eq!(contents, "tt001|X|http://img/x.jpg\n");
    }

    #[test]
    fn test_create_resets_leftover_list() {
        let (_dir, lists) = file_backed();
        lists.create("sample").unwrap();
        lists.toggle("sample", &entry("tt1", "A")).unwrap();

        lists.create("sample").unwrap();
        assert!(lists.read_all("sample").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_invalid_movie_id() {
        let (_dir, lists) = file_backed();
        lists.create("sample").unwrap();
        assert!(matches!(
            lists.toggle("sample", &entry("", "Nothing")),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_sled_backend_toggle() {
        let lists = sled_backed();
        assert!(lists.read_all("sample").is_err());
        lists.create("sample").unwrap();

        let x = entry("tt001", "X");
        assert_eq!(lists.toggle("sample", &x).unwrap(), ToggleOutcome::Added);
        assert_eq!(lists.read_all("sample").unwrap(), vec![x.clone()]);
        assert_eq!(lists.toggle("sample", &x).unwrap(), ToggleOutcome::Removed);
        assert!(lists.read_all("sample").unwrap().is_empty());
    }
}
