pub mod commands;
pub mod handlers;
pub mod models;
pub mod reply;
pub mod telegram;

pub use commands::{CallbackAction, Command};
pub use reply::Reply;
pub use telegram::TelegramClient;
