use serde::Deserialize;

use crate::domain::Side;

// --- Lichess game export (one NDJSON line) ---

/// Finished game as exported by `/api/games/user/{name}`
#[derive(Debug, Clone, Deserialize)]
pub struct GameRecord {
    pub players: GamePlayers,
    #[serde(default)]
    pub winner: Option<Side>,
    #[serde(default)]
    pub status: Option<String>,
    pub moves: String,
    pub variant: String,
    pub speed: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamePlayers {
    pub white: GamePlayer,
    pub black: GamePlayer,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GamePlayer {
    pub user: LightUser,
    #[serde(default)]
    pub rating: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LightUser {
    pub name: String,
}
