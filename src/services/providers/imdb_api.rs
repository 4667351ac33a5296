//! IMDb-API provider
//!
//! Endpoints used:
//! 1. Search: /en/API/SearchMovie/{key}/{query}
//! 2. Details: /en/API/Title/{key}/{id}
//! 3. Ratings: /API/Ratings/{key}/{id}
//! 4. Genre search: /API/AdvancedSearch/{key}/?genres={genres}
//!
//! Every response carries an `errorMessage` field; a non-empty one is treated
//! as a failure even when the HTTP status is 200.
use crate::{
    error::{AppError, AppResult},
    models::{
        ImdbRatings, ImdbSearchResponse, ImdbTitle, MovieDetails, MovieSummary, Ratings,
    },
    services::providers::MovieProvider,
};
use reqwest::{Client as HttpClient, Url};
use serde::de::DeserializeOwned;

#[derive(Clone)]
pub struct ImdbApiProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    placeholder_poster_url: String,
}

impl ImdbApiProvider {
    pub fn new(api_key: String, api_url: String, placeholder_poster_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
            placeholder_poster_url,
        }
    }

    /// Builds an endpoint URL, percent-encoding every path segment
    fn endpoint(&self, segments: &[&str]) -> AppResult<Url> {
        let mut url = Url::parse(&self.api_url)
            .map_err(|e| AppError::Internal(format!("Invalid IMDb-API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("IMDb-API base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn search_url(&self, query: &str) -> AppResult<Url> {
        self.endpoint(&["en", "API", "SearchMovie", self.api_key.as_str(), query])
    }

    fn title_url(&self, movie_id: &str) -> AppResult<Url> {
        self.endpoint(&["en", "API", "Title", self.api_key.as_str(), movie_id])
    }

    fn ratings_url(&self, movie_id: &str) -> AppResult<Url> {
        self.endpoint(&["API", "Ratings", self.api_key.as_str(), movie_id])
    }

    fn genre_search_url(&self, genres: &str) -> AppResult<Url> {
        // Trailing empty segment keeps the `/?genres=` form the API expects
        let mut url = self.endpoint(&["API", "AdvancedSearch", self.api_key.as_str(), ""])?;
        url.query_pairs_mut().append_pair("genres", genres);
        Ok(url)
    }

    /// Fetches and decodes one endpoint; `operation` names it in logs and errors
    async fn fetch<T: DeserializeOwned>(&self, url: Url, operation: &str) -> AppResult<T> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "IMDb-API {} returned status {}: {}",
                operation, status, body
            )));
        }

        let response_text = response.text().await?;
        tracing::debug!(operation = %operation, response = %response_text, "Raw IMDb-API response");

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                operation = %operation,
                "Failed to deserialize IMDb-API response"
            );
            AppError::ExternalApi(format!("Failed to parse IMDb-API {} response: {}", operation, e))
        })
    }

    fn check_error_message(error_message: Option<&str>, operation: &str) -> AppResult<()> {
        match error_message {
            Some(message) if !message.trim().is_empty() => Err(AppError::ExternalApi(format!(
                "IMDb-API {} failed: {}",
                operation, message
            ))),
            _ => Ok(()),
        }
    }

    fn summaries(&self, response: ImdbSearchResponse, operation: &str) -> AppResult<Vec<MovieSummary>> {
        Self::check_error_message(response.error_message.as_deref(), operation)?;
        Ok(response
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|result| result.into_summary(&self.placeholder_poster_url))
            .collect())
    }
}

#[async_trait::async_trait]
impl MovieProvider for ImdbApiProvider {
    async fn search(&self, query: &str) -> AppResult<Vec<MovieSummary>> {
        let response: ImdbSearchResponse = self.fetch(self.search_url(query)?, "search").await?;
        let movies = self.summaries(response, "search")?;

        tracing::info!(
            query = %query,
            results = movies.len(),
            provider = self.name(),
            "Movie search completed"
        );

        Ok(movies)
    }

    async fn details(&self, movie_id: &str) -> AppResult<MovieDetails> {
        let raw: ImdbTitle = self.fetch(self.title_url(movie_id)?, "title").await?;
        Self::check_error_message(raw.error_message.as_deref(), "title")?;
        Ok(raw.into_details(movie_id, &self.placeholder_poster_url))
    }

    async fn ratings(&self, movie_id: &str) -> AppResult<Ratings> {
        let raw: ImdbRatings = self.fetch(self.ratings_url(movie_id)?, "ratings").await?;
        Self::check_error_message(raw.error_message.as_deref(), "ratings")?;
        Ok(raw.into())
    }

    async fn recommendations(
        &self,
        genres: &str,
        excluding_id: &str,
    ) -> AppResult<Vec<MovieSummary>> {
        let response: ImdbSearchResponse = self
            .fetch(self.genre_search_url(genres)?, "advanced search")
            .await?;
        let movies: Vec<MovieSummary> = self
            .summaries(response, "advanced search")?
            .into_iter()
            .filter(|movie| movie.id != excluding_id)
            .collect();

        tracing::info!(
            genres = %genres,
            excluding_id = %excluding_id,
            results = movies.len(),
            provider = self.name(),
            "Genre search completed"
        );

        Ok(movies)
    }

    fn name(&self) -> &'static str {
        "imdb-api"
    }
}
