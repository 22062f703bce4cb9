use anyhow::Result;
use std::time::Duration;

use crate::bot::commands::{CallbackAction, Command};
use crate::bot::models::{InlineKeyboardButton, InlineKeyboardMarkup, Message};
use crate::bot::reply::Reply;
use crate::config::settings::AppConfig;
use crate::config::{get_players, TrackedPlayer};
use crate::services::{today, RatingService};
use crate::sessions::{SessionStore, UserId};

pub mod graph;
pub mod last;
pub mod ratings;

/// State shared by all handlers of one bot process
pub struct BotContext {
    pub config: AppConfig,
    pub ratings: RatingService,
    pub sessions: SessionStore,
}

impl BotContext {
    pub fn new(config: AppConfig) -> Result<Self> {
        let ratings = RatingService::new(&config)?;
        Ok(Self::with_service(config, ratings))
    }

    pub fn with_service(config: AppConfig, ratings: RatingService) -> Self {
        let sessions = SessionStore::new(Duration::from_secs(config.session.ttl_secs));
        Self {
            config,
            ratings,
            sessions,
        }
    }
}

pub async fn handle_command(ctx: &mut BotContext, command: Command, message: &Message) -> Result<Reply> {
    match command {
        Command::Start => Ok(ratings::start()),
        Command::Live => Ok(ratings::live(ctx, message.message_id).await),
        Command::Rating => ratings::stored(ctx, message.message_id),
        Command::Graph => Ok(graph::prompt_player(ctx, message.from.as_ref().map(|u| u.id))),
        Command::Last => Ok(last::prompt_player()),
    }
}

pub async fn handle_callback(ctx: &mut BotContext, action: CallbackAction, user: UserId) -> Result<Reply> {
    match action {
        CallbackAction::SelectPlayer(player) => Ok(graph::select_player(ctx, user, player)),
        CallbackAction::SelectRating(category) => graph::select_rating(ctx, user, category, today()),
        CallbackAction::LastGame(player) => last::summarize(ctx, player).await,
    }
}

/// Keyboard with one button per tracked player
pub fn player_keyboard(action: fn(TrackedPlayer) -> CallbackAction) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(get_players().into_iter().map(|player| {
        InlineKeyboardButton {
            text: player.nickname.to_string(),
            callback_data: action(player).to_data(),
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_keyboard_lists_tracked_players() {
        let keyboard = player_keyboard(CallbackAction::LastGame);

        assert_eq!(keyboard.inline_keyboard.len(), get_players().len());
        assert_eq!(keyboard.inline_keyboard[0][0].text, "Evgeniy1989");
        assert_eq!(keyboard.inline_keyboard[0][0].callback_data, "last_player_Evgeniy1989");
    }
}
