pub mod auth_modal;
pub mod concession_card;
pub mod footer;
pub mod header;
pub mod hero_carousel;
pub mod modal;
pub mod movie_grid;
pub mod showtime_modal;
pub mod toast;
