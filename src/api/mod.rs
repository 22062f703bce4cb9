pub mod lichess_client;
pub mod models;
pub mod parsers;

pub use lichess_client::LichessClient;
