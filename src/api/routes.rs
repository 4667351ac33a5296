use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;
use crate::middleware::{make_span_with_request_id, request_id_middleware};

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    let api = Router::new()
        // Accounts
        .route("/login", post(handlers::login))
        .route("/register", post(handlers::register))
        .route("/logout", post(handlers::logout))
        // Movies
        .route("/movies/search", get(handlers::search_movies))
        .route("/movies/:id", get(handlers::movie_details))
        .route(
            "/movies/:id/recommendations",
            get(handlers::movie_recommendations),
        )
        .route("/movies/:id/watchlist", post(handlers::toggle_movie))
        // Watchlist
        .route("/watchlist", get(handlers::get_watchlist))
        .route("/watchlist/toggle", post(handlers::toggle_entry));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", api)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(request_id_middleware))
                .layer(TraceLayer::new_for_http().make_span_with(make_span_with_request_id))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
