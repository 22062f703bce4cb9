pub mod connection;
pub mod models;
pub mod setup;
pub mod snapshots;

pub use connection::{create_pool, get_connection, DbConn, DbPool};
pub use models::*;
