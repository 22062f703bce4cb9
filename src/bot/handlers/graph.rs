use anyhow::Result;
use chrono::NaiveDate;
use log::info;

use super::{player_keyboard, BotContext};
use crate::bot::commands::CallbackAction;
use crate::bot::models::{InlineKeyboardButton, InlineKeyboardMarkup};
use crate::bot::reply::Reply;
use crate::chart;
use crate::config::TrackedPlayer;
use crate::domain::RatingCategory;
use crate::errors::FlowError;
use crate::reports;
use crate::sessions::UserId;

// --- Step 1: pick a player ---

/// Starting over discards whatever the user picked before
pub fn prompt_player(ctx: &mut BotContext, user: Option<UserId>) -> Reply {
    if let Some(user) = user {
        ctx.sessions.forget(user);
    }

    Reply::with_keyboard(
        "Please choose your player name:",
        player_keyboard(CallbackAction::SelectPlayer),
    )
}

// --- Step 2: pick a rating type ---

pub fn select_player(ctx: &mut BotContext, user: UserId, player: TrackedPlayer) -> Reply {
    ctx.sessions.select_player(user, player);

    Reply::with_keyboard(
        format!(
            "Player '{}' selected. Now, please choose the rating type:",
            player.nickname
        ),
        category_keyboard(),
    )
}

// --- Step 3: render ---

pub fn select_rating(
    ctx: &mut BotContext,
    user: UserId,
    category: RatingCategory,
    today: NaiveDate,
) -> Result<Reply> {
    let Some(player) = ctx.sessions.selected_player(user) else {
        return Ok(Reply::text(format!("Error: {}", FlowError::MissingSelection)));
    };

    let history = ctx.ratings.history(player.nickname, category)?;
    if history.is_empty() {
        return Ok(Reply::text(reports::no_history_message(player.nickname, category)));
    }

    let window_days = ctx.config.chart.window_days;
    let points = chart::recent_points(&history, today, window_days);
    if points.is_empty() {
        return Ok(Reply::text(reports::empty_window_message(
            player.nickname,
            category,
            window_days,
        )));
    }

    info!("Charting {} {} ({} points)", player.nickname, category, points.len());
    let png = chart::render_line_chart(&points, &ctx.config.chart)?;
    Ok(Reply::photo(
        png,
        reports::chart_caption(player.nickname, category, &points),
    ))
}

fn category_keyboard() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::single_column(RatingCategory::ALL.into_iter().map(|category| {
        InlineKeyboardButton {
            text: category.label().to_string(),
            callback_data: CallbackAction::SelectRating(category).to_data(),
        }
    }))
}
