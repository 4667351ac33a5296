use serde::{Deserialize, Serialize};

use super::WatchlistEntry;

/// Sentinel used wherever the movie database returns a missing or empty field
pub const NOT_AVAILABLE: &str = "N/A";

/// Normalizes an optional upstream field, mapping null and blank values to [`NOT_AVAILABLE`]
pub fn or_not_available(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Normalizes a poster URL, falling back to the placeholder image
pub fn or_placeholder(value: Option<String>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => placeholder.to_string(),
    }
}

/// A single search or recommendation hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub poster_url: String,
}

/// Descriptive fields of a movie, as returned by a detail lookup
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub genres: String,
    pub runtime: String,
    pub plot: String,
    pub content_rating: String,
    pub poster_url: String,
}

/// Review scores from the three aggregators
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ratings {
    pub imdb: String,
    pub metacritic: String,
    pub rotten_tomatoes: String,
}

impl Default for Ratings {
    fn default() -> Self {
        Self {
            imdb: NOT_AVAILABLE.to_string(),
            metacritic: NOT_AVAILABLE.to_string(),
            rotten_tomatoes: NOT_AVAILABLE.to_string(),
        }
    }
}

impl MovieDetails {
    /// The watchlist entry captured when toggling this movie from its detail view
    pub fn watchlist_entry(&self) -> WatchlistEntry {
        WatchlistEntry {
            movie_id: self.id.clone(),
            title: self.title.clone(),
            poster_url: self.poster_url.clone(),
        }
    }

    /// Genre list suitable for a genre query, or `None` when the movie has none
    ///
    /// Whitespace is removed so `"Action, Drama"` becomes `"Action,Drama"`.
    pub fn compact_genres(&self) -> Option<String> {
        if self.genres == NOT_AVAILABLE {
            return None;
        }
        let compact: String = self.genres.split_whitespace().collect();
        if compact.is_empty() {
            None
        } else {
            Some(compact)
        }
    }
}

/// Everything the detail view shows for one movie
///
/// Built fresh from the movie database on every view and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub ratings: Ratings,
}

impl MovieRecord {
    pub fn new(details: MovieDetails, ratings: Ratings) -> Self {
        Self { details, ratings }
    }
}
