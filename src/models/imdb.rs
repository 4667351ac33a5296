use serde::Deserialize;

use super::{or_not_available, or_placeholder, MovieDetails, MovieSummary, Ratings};

// ============================================================================
// IMDb-API Types
// ============================================================================

/// Envelope shared by the `SearchMovie` and `AdvancedSearch` endpoints
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImdbSearchResponse {
    #[serde(default)]
    pub results: Option<Vec<ImdbSearchResult>>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImdbSearchResult {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl ImdbSearchResult {
    pub fn into_summary(self, placeholder_poster: &str) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: or_not_available(self.title),
            description: or_not_available(self.description),
            poster_url: or_placeholder(self.image, placeholder_poster),
        }
    }
}

/// Response of the `Title` endpoint (only the fields the detail view uses)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImdbTitle {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub full_title: Option<String>,
    #[serde(default)]
    pub genres: Option<String>,
    #[serde(default)]
    pub runtime_str: Option<String>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub content_rating: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl ImdbTitle {
    /// Converts to details, keeping the requested id when the response omits it
    pub fn into_details(self, movie_id: &str, placeholder_poster: &str) -> MovieDetails {
        MovieDetails {
            id: self
                .id
                .filter(|id| !id.is_empty())
                .unwrap_or_else(|| movie_id.to_string()),
            title: or_not_available(self.full_title),
            genres: or_not_available(self.genres),
            runtime: or_not_available(self.runtime_str),
            plot: or_not_available(self.plot),
            content_rating: or_not_available(self.content_rating),
            poster_url: or_placeholder(self.image, placeholder_poster),
        }
    }
}

/// Response of the `Ratings` endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImdbRatings {
    #[serde(default, rename = "imDb")]
    pub imdb: Option<String>,
    #[serde(default)]
    pub metacritic: Option<String>,
    #[serde(default)]
    pub rotten_tomatoes: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl From<ImdbRatings> for Ratings {
    fn from(raw: ImdbRatings) -> Self {
        Ratings {
            imdb: or_not_available(raw.imdb),
            metacritic: or_not_available(raw.metacritic),
            rotten_tomatoes: or_not_available(raw.rotten_tomatoes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOPIC: &str = "https://imdb-api.com/images/original/nopicture.jpg";

    #[test]
    fn test_search_response_deserialization() {
        let json = r#"{
            "searchType": "Movie",
            "expression": "inception",
            "results": [
                {
                    "id": "tt1375666",
                    "resultType": "Title",
                    "image": "https://m.media-amazon.com/images/inception.jpg",
                    "title": "Inception",
                    "description": "(2010)"
                },
                {
                    "id": "tt5295894",
                    "resultType": "Title",
                    "image": "",
                    "title": "Inception: The Cobol Job",
                    "description": null
                }
            ],
            "errorMessage": ""
        }"#;

        let response: ImdbSearchResponse = serde_json::from_str(json).unwrap();
        let summaries: Vec<MovieSummary> = response
            .results
            .unwrap()
            .into_iter()
            .map(|r| r.into_summary(NOPIC))
            .collect();

        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "Inception");
        assert_eq!(summaries[0].description, "(2010)");
        assert_eq!(summaries[1].poster_url, NOPIC);
        assert_eq!(summaries[1].description, "N/A");
    }

    #[test]
    fn test_title_with_nulls_uses_sentinel() {
        let json = r#"{
            "id": "tt0000001",
            "fullTitle": "Carmencita (1894)",
            "genres": "Documentary, Short",
            "runtimeStr": null,
            "plot": "",
            "contentRating": null,
            "image": null,
            "errorMessage": null
        }"#;

        let raw: ImdbTitle = serde_json::from_str(json).unwrap();
        let details = raw.into_details("tt0000001", NOPIC);

        assert_eq!(details.title, "Carmencita (1894)");
        assert_eq!(details.genres, "Documentary, Short");
        assert_eq!(details.runtime, "N/A");
        assert_eq!(details.plot, "N/A");
        assert_eq!(details.content_rating, "N/A");
        assert_eq!(details.poster_url, NOPIC);
    }

    #[test]
    fn test_title_missing_id_keeps_requested_id() {
        let raw: ImdbTitle = serde_json::from_str(r#"{"id": null}"#).unwrap();
        assert_eq!(raw.into_details("tt42", NOPIC).id, "tt42");
    }

    #[test]
    fn test_ratings_conversion() {
        let json = r#"{
            "imDbId": "tt1375666",
            "imDb": "8.8",
            "metacritic": "74",
            "theMovieDb": "8.4",
            "rottenTomatoes": "",
            "errorMessage": ""
        }"#;

        let ratings: Ratings = serde_json::from_str::<ImdbRatings>(json).unwrap().into();
        assert_eq!(ratings.imdb, "8.8");
        assert_eq!(ratings.metacritic, "74");
        assert_eq!(ratings.rotten_tomatoes, "N/A");
    }
}
