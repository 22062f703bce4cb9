pub mod players;
pub mod settings;

pub use players::{find_player, get_players, TrackedPlayer};
