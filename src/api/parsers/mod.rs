mod game;

pub use game::parse_first_game;
