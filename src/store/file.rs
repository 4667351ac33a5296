//! Line-oriented text file backend
//!
//! Keeps the legacy on-disk layout: `creds.txt` holds `username|password`
//! lines and `<username>.txt` holds `movie_id|title|poster_url` lines. The key
//! is everything before the first `|`, the value everything after it.
//!
//! New records are appended. Replacements and deletions rewrite the file
//! through a temporary sibling that is renamed over the original, so a crash
//! mid-write leaves either the old or the new list, never a torn one.
use std::{
    fs::{self, File, OpenOptions},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use crate::{
    error::{AppError, AppResult},
    models::FIELD_DELIMITER,
    store::{Record, RecordStore, Table},
};

const CREDENTIALS_FILE: &str = "creds.txt";
const CREDENTIALS_STEM: &str = "creds";
const TABLE_EXTENSION: &str = "txt";
const TEMP_EXTENSION: &str = "txt.tmp";

pub struct FileStore {
    root: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Opens (and creates if needed) the data directory
    pub fn open(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, table: &Table) -> AppResult<PathBuf> {
        match table {
            Table::Credentials => Ok(self.root.join(CREDENTIALS_FILE)),
            Table::Watchlist(username) => {
                if username.is_empty()
                    || username.starts_with('.')
                    || username.contains(['/', '\\'])
                    || username.eq_ignore_ascii_case(CREDENTIALS_STEM)
                {
                    return Err(AppError::InvalidInput(format!(
                        "Username cannot be used as a file name: {:?}",
                        username
                    )));
                }
                Ok(self
                    .root
                    .join(format!("{}.{}", username, TABLE_EXTENSION)))
            }
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| AppError::Internal("File store lock poisoned".to_string()))
    }

    /// Raw file contents, or `None` if the table file does not exist
    fn read_table(path: &Path) -> AppResult<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Non-blank lines, with the line ending removed and nothing else
    fn lines(contents: &str) -> impl Iterator<Item = &str> {
        contents
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
    }

    fn parse_line(line: &str) -> Option<Record> {
        let (key, value) = line.split_once(FIELD_DELIMITER)?;
        if key.is_empty() {
            return None;
        }
        Some(Record::new(key, value))
    }

    fn has_key(line: &str, key: &str) -> bool {
        Self::parse_line(line).is_some_and(|record| record.key == key)
    }

    fn format_line(key: &str, value: &str) -> String {
        format!("{}{}{}", key, FIELD_DELIMITER, value)
    }

    fn check_record(key: &str, value: &str) -> AppResult<()> {
        if key.is_empty() || key.contains(FIELD_DELIMITER) || key.contains(['\n', '\r']) {
            return Err(AppError::InvalidInput(format!("Invalid record key: {:?}", key)));
        }
        if value.contains(['\n', '\r']) {
            return Err(AppError::InvalidInput(
                "Record value cannot contain line breaks".to_string(),
            ));
        }
        Ok(())
    }

    fn rewrite(path: &Path, lines: &[&str]) -> AppResult<()> {
        let temp_path = path.with_extension(TEMP_EXTENSION);
        {
            let mut file = File::create(&temp_path)?;
            for line in lines {
                writeln!(file, "{}", line)?;
            }
            file.sync_all()?;
        }
        fs::rename(&temp_path, path)?;
        Ok(())
    }

    /// Appends one line, terminating an unterminated last line first
    fn append_line(path: &Path, contents: &str, line: &str) -> AppResult<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        if !contents.is_empty() && !contents.ends_with('\n') {
            writeln!(file)?;
        }
        writeln!(file, "{}", line)?;
        Ok(())
    }

    /// Rewrites the file without the lines for `key`; returns whether any existed
    fn remove_key(path: &Path, contents: &str, key: &str) -> AppResult<bool> {
        let all: Vec<&str> = Self::lines(contents).collect();
        let kept: Vec<&str> = all
            .iter()
            .copied()
            .filter(|line| !Self::has_key(line, key))
            .collect();

        if kept.len() == all.len() {
            return Ok(false);
        }

        Self::rewrite(path, &kept)?;
        Ok(true)
    }
}

impl RecordStore for FileStore {
    fn table_exists(&self, table: &Table) -> AppResult<bool> {
        Ok(self.path_for(table)?.is_file())
    }

    fn create_table(&self, table: &Table) -> AppResult<()> {
        let path = self.path_for(table)?;
        let _guard = self.lock()?;
        File::create(&path)?;
        tracing::debug!(table = %table, path = %path.display(), "Table file created");
        Ok(())
    }

    fn get(&self, table: &Table, key: &str) -> AppResult<Option<String>> {
        let path = self.path_for(table)?;
        let Some(contents) = Self::read_table(&path)? else {
            return Ok(None);
        };

        let found = Self::lines(&contents)
            .filter_map(Self::parse_line)
            .find(|record| record.key == key)
            .map(|record| record.value);
        Ok(found)
    }

    fn put(&self, table: &Table, key: &str, value: &str) -> AppResult<()> {
        Self::check_record(key, value)?;
        let path = self.path_for(table)?;
        let _guard = self.lock()?;
        let contents = Self::read_table(&path)?.unwrap_or_default();
        let new_line = Self::format_line(key, value);

        let mut lines: Vec<&str> = Self::lines(&contents).collect();
        match lines.iter().position(|line| Self::has_key(line, key)) {
            Some(index) => {
                lines[index] = &new_line;
                Self::rewrite(&path, &lines)?;
            }
            None => Self::append_line(&path, &contents, &new_line)?,
        }

        Ok(())
    }

    fn append(&self, table: &Table, key: &str, value: &str) -> AppResult<()> {
        Self::check_record(key, value)?;
        let path = self.path_for(table)?;
        let _guard = self.lock()?;
        let contents = Self::read_table(&path)?.unwrap_or_default();
        Self::append_line(&path, &contents, &Self::format_line(key, value))
    }

    fn insert_new(&self, table: &Table, key: &str, value: &str) -> AppResult<bool> {
        Self::check_record(key, value)?;
        let path = self.path_for(table)?;
        let _guard = self.lock()?;
        let contents = Self::read_table(&path)?.unwrap_or_default();

        if Self::lines(&contents).any(|line| Self::has_key(line, key)) {
            return Ok(false);
        }

        Self::append_line(&path, &contents, &Self::format_line(key, value))?;
        Ok(true)
    }

    fn delete(&self, table: &Table, key: &str) -> AppResult<bool> {
        let path = self.path_for(table)?;
        let _guard = self.lock()?;
        let Some(contents) = Self::read_table(&path)? else {
            return Ok(false);
        };

        Self::remove_key(&path, &contents, key)
    }

    fn toggle(&self, table: &Table, key: &str, value: &str) -> AppResult<bool> {
        Self::check_record(key, value)?;
        let path = self.path_for(table)?;
        let _guard = self.lock()?;
        let contents = Self::read_table(&path)?.unwrap_or_default();

        if Self::remove_key(&path, &contents, key)? {
            return Ok(false);
        }

        Self::append_line(&path, &contents, &Self::format_line(key, value))?;
        Ok(true)
    }

    fn scan(&self, table: &Table) -> AppResult<Vec<Record>> {
        let path = self.path_for(table)?;
        let Some(contents) = Self::read_table(&path)? else {
            return Ok(Vec::new());
        };

        let mut records = Vec::new();
        for (index, line) in Self::lines(&contents).enumerate() {
            match Self::parse_line(line) {
                Some(record) => records.push(record),
                None => tracing::warn!(
                    table = %table,
                    line = index + 1,
                    "Skipping malformed record"
                ),
            }
        }

        Ok(records)
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
