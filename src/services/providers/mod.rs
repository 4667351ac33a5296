//! Movie data provider abstraction
//!
//! The movie database is an external collaborator. Providers translate its
//! responses into the crate's models and guarantee that missing fields arrive
//! as the `N/A` sentinel, never as nulls.
use crate::{
    error::AppResult,
    models::{MovieDetails, MovieSummary, Ratings},
};

pub mod imdb_api;

pub use imdb_api::ImdbApiProvider;

/// Trait for movie data providers
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Search for movies by title
    async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>>;

    /// Descriptive details for one movie
    async fn details(&self, movie_id: &str) -> AppResult<MovieDetails>;

    /// Aggregator scores for one movie
    async fn ratings(&self, movie_id: &str) -> AppResult<Ratings>;

    /// Movies matching a compact comma-separated genre list, without `excluding_id`
    async fn recommendations(
        &self,
        genres: &str,
        excluding_id: &str,
    ) -> AppResult<Vec<MovieSummary>>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
