pub mod display;
pub mod imdb;
pub mod movie;
pub mod session;
pub mod watchlist;

pub use imdb::{ImdbRatings, ImdbSearchResponse, ImdbSearchResult, ImdbTitle};
pub use movie::{
    or_not_available, or_placeholder, MovieDetails, MovieRecord, MovieSummary, Ratings,
    NOT_AVAILABLE,
};
pub use session::Session;
pub use watchlist::{ToggleOutcome, WatchlistEntry, FIELD_DELIMITER};
