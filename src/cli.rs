use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::RatingCategory;

#[derive(Parser, Debug)]
#[command(author, version, about = "Lichess rating snapshots and chat bot")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Run the Telegram bot (token from CHESSTOKEN)
    Bot,
    /// Fetch live ratings of all tracked players and store today's snapshot
    Snapshot,
    /// Print live ratings fetched from Lichess
    Live,
    /// Print the ratings stored for today
    Today,
    /// Print a player's stored history for one rating type
    History {
        /// Lichess nickname as stored in the database
        player: String,
        /// Bullet, Blitz or Rapid
        category: RatingCategory,
        /// Also write the last-month chart as PNG to this path
        #[arg(short, long)]
        chart: Option<PathBuf>,
    },
    /// Summarise a player's last finished game
    Last {
        /// Lichess nickname
        player: String,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_arguments() {
        let cli = Cli::try_parse_from([
            "lichess_rating_bot",
            "history",
            "Viposha",
            "blitz",
            "--chart",
            "out.png",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Command::History {
                player: "Viposha".to_string(),
                category: RatingCategory::Blitz,
                chart: Some(PathBuf::from("out.png")),
            }
        );
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let parsed = Cli::try_parse_from(["lichess_rating_bot", "history", "Viposha", "classical"]);
        assert!(parsed.is_err());
    }
}
