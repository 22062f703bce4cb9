pub mod bot;
pub mod ratings;
pub mod snapshot;

pub use ratings::{today, RatingService};
