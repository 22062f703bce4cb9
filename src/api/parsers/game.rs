use anyhow::Result;

use crate::api::models::GameRecord;
use crate::errors::with_parse_context;

/// Decode the first record of an NDJSON game export; later lines are ignored
pub fn parse_first_game(body: &str) -> Result<GameRecord> {
    let Some(line) = first_line(body) else {
        anyhow::bail!("No finished games in response");
    };

    with_parse_context(serde_json::from_str(line), "game record")
}

fn first_line(body: &str) -> Option<&str> {
    body.lines().map(str::trim).find(|line| !line.is_empty())
}
