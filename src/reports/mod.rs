use colored::Colorize;

use crate::chart::ChartPoint;
use crate::database::HistoryPoint;
use crate::domain::{format_rating, PlayerRatingSnapshot, RatingCategory};

pub const NO_LIVE_RATINGS: &str = "Could not fetch live ratings right now.";
pub const NO_STORED_RATINGS: &str = "No player ratings found in the database.";

/// `/live` text: one block per player that could be fetched
pub fn live_report(snapshots: &[PlayerRatingSnapshot]) -> String {
    if snapshots.is_empty() {
        return NO_LIVE_RATINGS.to_string();
    }
    join_blocks(snapshots.iter().map(|s| rating_block(&format!("{}:", s.nickname), s)))
}

/// `/rating` text: today's stored rows
pub fn stored_report(snapshots: &[PlayerRatingSnapshot]) -> String {
    if snapshots.is_empty() {
        return NO_STORED_RATINGS.to_string();
    }
    join_blocks(
        snapshots
            .iter()
            .map(|s| rating_block(&format!("Rating of {}:", s.nickname), s)),
    )
}

/// Full textual history of one category
pub fn history_report(player: &str, category: RatingCategory, history: &[HistoryPoint]) -> String {
    if history.is_empty() {
        return no_history_message(player, category);
    }

    let mut report = format!(
        "Results for player '{}' with rating type '{}':",
        player, category
    );
    for point in history {
        report.push_str(&format!(
            "\nDate: {}, {} rating: {}",
            point.date,
            category,
            format_rating(point.rating)
        ));
    }
    report
}

pub fn no_history_message(player: &str, category: RatingCategory) -> String {
    format!(
        "No results found for player '{}' with rating type '{}'.",
        player, category
    )
}

pub fn empty_window_message(player: &str, category: RatingCategory, window_days: i64) -> String {
    format!(
        "No {} ratings for '{}' in the last {} days.",
        category, player, window_days
    )
}

/// Photo caption for a history chart; `points` must not be empty
pub fn chart_caption(player: &str, category: RatingCategory, points: &[ChartPoint]) -> String {
    let mut caption = format!("{} rating of {}", category, player);
    if let Some(latest) = points.last() {
        caption.push_str(&format!("\nLatest: {} ({})", latest.rating, latest.date));
    }
    caption
}

/// Print a titled block to stdout (CLI output)
pub fn print_section(title: &str, body: &str) {
    println!("{}", title.bold().green());
    println!("{}", body);
}

fn rating_block(header: &str, snapshot: &PlayerRatingSnapshot) -> String {
    let mut block = header.to_string();
    for category in RatingCategory::ALL {
        block.push_str(&format!(
            "\n  {} = {}",
            category,
            format_rating(snapshot.get(category))
        ));
    }
    block.push_str(&format!("\n  Date = {}", snapshot.date));
    block
}

fn join_blocks(blocks: impl Iterator<Item = String>) -> String {
    blocks.collect::<Vec<_>>().join("\n\n")
}
