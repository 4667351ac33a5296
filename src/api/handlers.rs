use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::{CurrentSession, OptionalSession};
use crate::models::display::{overflow, LIST_TITLE_WIDTH, PLOT_WIDTH};
use crate::models::{MovieRecord, MovieSummary, ToggleOutcome, WatchlistEntry};
use crate::services::accounts::{self, LoginOutcome};
use crate::services::{movies, Carousel};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub token: Uuid,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

#[derive(Debug, Serialize)]
pub struct MovieListItem {
    #[serde(flatten)]
    pub movie: MovieSummary,
    pub display_title: String,
}

impl From<MovieSummary> for MovieListItem {
    fn from(movie: MovieSummary) -> Self {
        Self {
            display_title: overflow(&movie.title, LIST_TITLE_WIDTH),
            movie,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MovieRecordResponse {
    #[serde(flatten)]
    pub record: MovieRecord,
    pub display_plot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_watchlist: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    pub seed: Option<u64>,
    #[serde(default)]
    pub start: usize,
}

#[derive(Debug, Serialize)]
pub struct RecommendationsPage {
    pub seed: u64,
    pub start: usize,
    pub next_start: usize,
    pub previous_start: usize,
    pub total: usize,
    pub movies: Vec<MovieListItem>,
}

#[derive(Debug, Serialize)]
pub struct WatchlistItem {
    #[serde(flatten)]
    pub entry: WatchlistEntry,
    pub display_title: String,
}

impl From<WatchlistEntry> for WatchlistItem {
    fn from(entry: WatchlistEntry) -> Self {
        Self {
            display_title: overflow(&entry.title, LIST_TITLE_WIDTH),
            entry,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ToggleResponse {
    pub outcome: ToggleOutcome,
    pub message: &'static str,
    pub entry: WatchlistEntry,
}

impl ToggleResponse {
    fn new(outcome: ToggleOutcome, entry: WatchlistEntry) -> Self {
        Self {
            outcome,
            message: outcome.message(),
            entry,
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Log in with an existing account
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> AppResult<Json<SessionResponse>> {
    match accounts::login(&state.credentials, &request.username, &request.password)? {
        LoginOutcome::Authenticated => {
            let session = state.sessions.start(&request.username).await;
            Ok(Json(SessionResponse {
                token: session.token,
                username: session.username,
                message: None,
            }))
        }
        LoginOutcome::UnknownUser => Err(AppError::NotFound(
            "User not found. Register to create a new user.".to_string(),
        )),
        LoginOutcome::WrongPassword => {
            Err(AppError::Unauthorized("Incorrect password".to_string()))
        }
    }
}

/// Create an account and log it in
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    accounts::register(
        &state.credentials,
        &state.watchlists,
        &request.username,
        &request.password,
    )?;

    let session = state.sessions.start(&request.username).await;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token: session.token,
            username: session.username,
            message: Some("Registration successful.".to_string()),
        }),
    ))
}

pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> StatusCode {
    state.sessions.end(&session.token).await;
    StatusCode::NO_CONTENT
}

/// Search movies by title
pub async fn search_movies(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<MovieListItem>>> {
    let results = movies::search(state.provider.as_ref(), &query.q).await?;
    Ok(Json(results.into_iter().map(MovieListItem::from).collect()))
}

/// Full detail record; `in_watchlist` is set for logged-in callers
pub async fn movie_details(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    OptionalSession(session): OptionalSession,
) -> AppResult<Json<MovieRecordResponse>> {
    let record = movies::movie_record(state.provider.as_ref(), &movie_id).await?;

    let in_watchlist = match session {
        Some(session) => match state.watchlists.contains(&session.username, &movie_id) {
            Ok(found) => Some(found),
            Err(AppError::NotFound(_)) => Some(false),
            Err(e) => return Err(e),
        },
        None => None,
    };

    Ok(Json(MovieRecordResponse {
        display_plot: overflow(&record.details.plot, PLOT_WIDTH),
        record,
        in_watchlist,
    }))
}

/// One carousel page of movies sharing this movie's genres
pub async fn movie_recommendations(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
    Query(query): Query<RecommendationsQuery>,
) -> AppResult<Json<RecommendationsPage>> {
    let details = state.provider.details(&movie_id).await?;
    let seed = query.seed.unwrap_or_else(rand::random);

    let mut all = movies::recommendations(state.provider.as_ref(), &details, seed).await?;
    let carousel = Carousel::new(all.len(), query.start);
    let range = carousel.range();
    let total = all.len();

    let page: Vec<MovieListItem> = all
        .drain(range)
        .map(MovieListItem::from)
        .collect();

    Ok(Json(RecommendationsPage {
        seed,
        start: carousel.start(),
        next_start: carousel.next().start(),
        previous_start: carousel.previous().start(),
        total,
        movies: page,
    }))
}

/// Toggle a movie using the entry captured from its detail record
pub async fn toggle_movie(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(movie_id): Path<String>,
) -> AppResult<Json<ToggleResponse>> {
    let entry = state.provider.details(&movie_id).await?.watchlist_entry();
    let outcome = state.watchlists.toggle(&session.username, &entry)?;
    Ok(Json(ToggleResponse::new(outcome, entry)))
}

/// The logged-in user's watchlist in stored order
pub async fn get_watchlist(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<Json<Vec<WatchlistItem>>> {
    let entries = state.watchlists.read_all(&session.username)?;
    Ok(Json(entries.into_iter().map(WatchlistItem::from).collect()))
}

/// Toggle an explicit entry
pub async fn toggle_entry(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(entry): Json<WatchlistEntry>,
) -> AppResult<Json<ToggleResponse>> {
    let outcome = state.watchlists.toggle(&session.username, &entry)?;
    Ok(Json(ToggleResponse::new(outcome, entry)))
}
