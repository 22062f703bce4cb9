use anyhow::Result;

use lichess_rating_bot::cli::Command;
use lichess_rating_bot::{
    handle_bot, handle_completions, handle_history, handle_last, handle_live, handle_snapshot,
    handle_today, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Bot => handle_bot(),
        Command::Snapshot => handle_snapshot(),
        Command::Live => handle_live(),
        Command::Today => handle_today(),
        Command::History {
            player,
            category,
            chart,
        } => handle_history(player, *category, chart.as_deref()),
        Command::Last { player } => handle_last(player),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
