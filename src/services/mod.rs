pub mod accounts;
pub mod carousel;
pub mod movies;
pub mod providers;
pub mod sessions;
pub mod validation;

pub use carousel::Carousel;
pub use providers::{ImdbApiProvider, MovieProvider};
pub use sessions::SessionStore;
