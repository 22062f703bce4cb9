use anyhow::Result;

use super::{player_keyboard, BotContext};
use crate::bot::commands::CallbackAction;
use crate::bot::reply::Reply;
use crate::config::TrackedPlayer;

pub fn prompt_player() -> Reply {
    Reply::with_keyboard("Оберіть гравця:", player_keyboard(CallbackAction::LastGame))
}

/// Summarise the newest finished game; fetch or decode failures propagate
pub async fn summarize(ctx: &mut BotContext, player: TrackedPlayer) -> Result<Reply> {
    let summary = ctx.ratings.last_game_summary(player.nickname).await?;
    Ok(Reply::text(summary.to_string()))
}
