pub mod game;
pub mod rating;

pub use game::{GameStatus, GameSummary, PlayerLine, Side};
pub use rating::{format_rating, parse_rating, PlayerRatingSnapshot, RatingCategory};
