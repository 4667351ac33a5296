use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Field separator of the line-oriented record format
pub const FIELD_DELIMITER: char = '|';

/// A movie reference kept on a user's watchlist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WatchlistEntry {
    pub movie_id: String,
    pub title: String,
    pub poster_url: String,
}

/// Which way a toggle went
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    Added,
    Removed,
}

impl ToggleOutcome {
    /// Confirmation shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            ToggleOutcome::Added => "Added to list.",
            ToggleOutcome::Removed => "Removed from list.",
        }
    }
}

impl std::fmt::Display for ToggleOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToggleOutcome::Added => write!(f, "added"),
            ToggleOutcome::Removed => write!(f, "removed"),
        }
    }
}

impl WatchlistEntry {
    pub fn new(
        movie_id: impl Into<String>,
        title: impl Into<String>,
        poster_url: impl Into<String>,
    ) -> Self {
        Self {
            movie_id: movie_id.into(),
            title: title.into(),
            poster_url: poster_url.into(),
        }
    }

    /// Rejects ids that cannot be stored as a record key
    pub fn validate(&self) -> AppResult<()> {
        if self.movie_id.trim().is_empty() {
            return Err(AppError::InvalidInput("Movie id is required".to_string()));
        }
        if self
            .movie_id
            .chars()
            .any(|c| c == FIELD_DELIMITER || c.is_whitespace() || c.is_control())
        {
            return Err(AppError::InvalidInput(format!(
                "Invalid movie id: {:?}",
                self.movie_id
            )));
        }
        Ok(())
    }

    /// Stored value for this entry: `title|poster_url`
    ///
    /// The title is the middle field, so delimiters and line breaks in it are
    /// replaced with spaces. The poster URL is the last field and may keep `|`.
    pub fn to_value(&self) -> String {
        let title: String = self
            .title
            .chars()
            .map(|c| {
                if c == FIELD_DELIMITER || c.is_control() {
                    ' '
                } else {
                    c
                }
            })
            .collect();
        let poster_url: String = self.poster_url.chars().filter(|c| !c.is_control()).collect();
        format!("{}{}{}", title, FIELD_DELIMITER, poster_url)
    }

    /// Rebuilds an entry from its record key and stored value
    pub fn from_record(movie_id: &str, value: &str) -> Option<Self> {
        let (title, poster_url) = value.split_once(FIELD_DELIMITER)?;
        Some(Self::new(movie_id, title, poster_url))
    }
}
