pub mod api;
pub mod bot;
pub mod chart;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod rate_limiter;
pub mod reports;
pub mod services;
pub mod sessions;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use std::path::Path;

use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::RatingCategory;
use crate::services::bot::BotService;
use crate::services::snapshot::SnapshotService;
use crate::services::{today, RatingService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_bot() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let mut service = BotService::new(config)?;
        service.run().await
    })
}

pub fn handle_snapshot() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let mut service = SnapshotService::new(&config)?;
        service.run().await.map(|_| ())
    })
}

pub fn handle_live() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let mut ratings = RatingService::new(&config)?;
        let snapshots = ratings.live_ratings(today()).await;
        reports::print_section("Live ratings", &reports::live_report(&snapshots));
        Ok(())
    })
}

pub fn handle_today() -> Result<()> {
    let config = AppConfig::from_env();
    let ratings = RatingService::new(&config)?;
    let date = today();
    let snapshots = ratings.stored_for_date(date)?;
    reports::print_section(&format!("Stored ratings for {}", date), &reports::stored_report(&snapshots));
    Ok(())
}

pub fn handle_history(player: &str, category: RatingCategory, chart_path: Option<&Path>) -> Result<()> {
    let config = AppConfig::from_env();
    let ratings = RatingService::new(&config)?;
    let history = ratings.history(player, category)?;
    reports::print_section("History", &reports::history_report(player, category, &history));

    let Some(path) = chart_path else {
        return Ok(());
    };

    let points = chart::recent_points(&history, today(), config.chart.window_days);
    if points.is_empty() {
        println!("{}", reports::empty_window_message(player, category, config.chart.window_days));
        return Ok(());
    }

    let png = chart::render_line_chart(&points, &config.chart)?;
    std::fs::write(path, png)
        .with_context(|| format!("Failed to write chart to {}", path.display()))?;
    log::info!("Chart written to {}", path.display());
    Ok(())
}

pub fn handle_last(player: &str) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let mut ratings = RatingService::new(&config)?;
        let summary = ratings.last_game_summary(player).await?;
        reports::print_section(&format!("Last game of {}", player), &summary.to_string());
        Ok(())
    })
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
