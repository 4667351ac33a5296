use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, MovieRecord, MovieSummary},
    services::providers::MovieProvider,
};

/// Title search; a blank query is rejected before reaching the provider
pub async fn search(provider: &dyn MovieProvider, query: &str) -> AppResult<Vec<MovieSummary>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::InvalidInput("Search box is empty.".to_string()));
    }
    provider.search(query).await
}

/// Fetches details and ratings concurrently and combines them
pub async fn movie_record(provider: &dyn MovieProvider, movie_id: &str) -> AppResult<MovieRecord> {
    let (details, ratings) =
        tokio::try_join!(provider.details(movie_id), provider.ratings(movie_id))?;
    Ok(MovieRecord::new(details, ratings))
}

/// Movies sharing the genres of `details`, in a seeded random order
///
/// The same seed always yields the same order, so a client can page through
/// the list across requests.
pub async fn recommendations(
    provider: &dyn MovieProvider,
    details: &MovieDetails,
    seed: u64,
) -> AppResult<Vec<MovieSummary>> {
    let Some(genres) = details.compact_genres() else {
        tracing::debug!(movie_id = %details.id, "No genres, skipping recommendations");
        return Ok(Vec::new());
    };

    let mut movies = provider.recommendations(&genres, &details.id).await?;
    movies.shuffle(&mut StdRng::seed_from_u64(seed));
    Ok(movies)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Ratings, NOT_AVAILABLE};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Provider that serves canned data and counts genre searches
    #[derive(Default)]
    struct CannedProvider {
        genre_calls: AtomicUsize,
    }

    fn summary(id: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: format!("Movie {}", id),
            description: "(2001)".to_string(),
            poster_url: format!("http://img/{}.jpg", id),
        }
    }

    #[async_trait::async_trait]
    impl MovieProvider for CannedProvider {
        async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
            Ok(vec![summary(query)])
        }

        async fn details(&self, movie_id: &str) -> AppResult<MovieDetails> {
            Ok(MovieDetails {
                id: movie_id.to_string(),
                title: "Heat (1995)".to_string(),
                genres: "Action, Crime".to_string(),
                runtime: "2h 50mins".to_string(),
                plot: "A group of professional bank robbers.".to_string(),
                content_rating: "R".to_string(),
                poster_url: "http://img/heat.jpg".to_string(),
            })
        }

        async fn ratings(&self, _movie_id: &str) -> AppResult<Ratings> {
            Ok(Ratings {
                imdb: "8.3".to_string(),
                ..Ratings::default()
            })
        }

        async fn recommendations(
            &self,
            genres: &str,
            excluding_id: &str,
        ) -> AppResult<Vec<MovieSummary>> {
            self.genre_calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(genres, "Action,Crime");
            Ok((0..10)
                .map(|i| summary(&format!("tt{}", i)))
                .filter(|m| m.id != excluding_id)
                .collect())
        }

        fn name(&self) -> &'static str {
            "canned"
        }
    }

    #[tokio::test]
    async fn test_blank_search_rejected() {
        let provider = CannedProvider::default();
        let result = search(&provider, "   ").await;
        assert!(matches!(result, Err(AppError::InvalidInput(msg)) if msg == "Search box is empty."));
    }

    #[tokio::test]
    async fn test_search_trims_query() {
        let provider = CannedProvider::default();
        let results = search(&provider, "  heat ").await.unwrap();
        assert_eq!(results[0].id, "heat");
    }

    #[tokio::test]
    async fn test_movie_record_combines_details_and_ratings() {
        let provider = CannedProvider::default();
        let record = movie_record(&provider, "tt0113277").await.unwrap();

        assert_eq!(record.details.id, "tt0113277");
        assert_eq!(record.details.title, "Heat (1995)");
        assert_eq!(record.ratings.imdb, "8.3");
        assert_eq!(record.ratings.metacritic, NOT_AVAILABLE);
    }

    #[tokio::test]
    async fn test_recommendations_are_seeded() {
        let provider = CannedProvider::default();
        let details = provider.details("tt3").await.unwrap();

        let first = recommendations(&provider, &details, 42).await.unwrap();
        let again = recommendations(&provider, &details, 42).await.unwrap();

        assert_eq!(first, again);
        assert_eq!(first.len(), 9);
        assert!(first.iter().all(|m| m.id != "tt3"));
    }

    #[tokio::test]
    async fn test_no_genres_skips_lookup() {
        let provider = CannedProvider::default();
        let mut details = provider.details("tt1").await.unwrap();
        details.genres = NOT_AVAILABLE.to_string();

        let movies = recommendations(&provider, &details, 7).await.unwrap();
        assert!(movies.is_empty());
        assert_eq!(provider.genre_calls.load(Ordering::SeqCst), 0);
    }
}
