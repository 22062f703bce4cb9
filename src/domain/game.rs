use serde::Deserialize;
use std::fmt;

use crate::api::models::{GamePlayer, GameRecord};
use crate::domain::rating::format_rating;

/// Colour of a side; also used for the winner field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    White,
    Black,
}

/// Finish reason reported by Lichess
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameStatus {
    Mate,
    Resign,
    OutOfTime,
    Draw,
    Stalemate,
    Aborted,
    Timeout,
    NoStart,
    Cheat,
    VariantEnd,
    UnknownFinish,
    Other(String),
}

impl GameStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "mate" => Self::Mate,
            "resign" => Self::Resign,
            "outoftime" => Self::OutOfTime,
            "draw" => Self::Draw,
            "stalemate" => Self::Stalemate,
            "aborted" => Self::Aborted,
            "timeout" => Self::Timeout,
            "noStart" => Self::NoStart,
            "cheat" => Self::Cheat,
            "variantEnd" => Self::VariantEnd,
            "unknownFinish" => Self::UnknownFinish,
            other => Self::Other(other.to_string()),
        }
    }

    /// Human phrase; unmapped codes are shown as-is
    pub fn phrase(&self) -> &str {
        match self {
            Self::Mate => "by checkmate",
            Self::Resign => "by resignation",
            Self::OutOfTime | Self::Timeout => "on time",
            Self::Draw => "drawn",
            Self::Stalemate => "by stalemate",
            Self::Aborted => "aborted",
            Self::NoStart => "not started",
            Self::Cheat => "game ended due to cheat detection",
            Self::VariantEnd => "variant end",
            Self::UnknownFinish => "finished (reason unknown)",
            Self::Other(code) => code,
        }
    }
}

/// Name and rating of one participant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerLine {
    pub name: String,
    pub rating: Option<u32>,
}

impl PlayerLine {
    fn from_player(player: &GamePlayer) -> Self {
        Self {
            name: player.user.name.clone(),
            rating: player.rating,
        }
    }
}

impl fmt::Display for PlayerLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, format_rating(self.rating))
    }
}

/// One finished game, reduced to what the chat reply needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub white: PlayerLine,
    pub black: PlayerLine,
    pub winner: Option<Side>,
    pub status: GameStatus,
    pub move_count: usize,
    pub variant: String,
    pub speed: String,
}

impl GameSummary {
    pub fn from_record(record: &GameRecord) -> Self {
        let status = record.status.as_deref().unwrap_or("unknownFinish");

        Self {
            white: PlayerLine::from_player(&record.players.white),
            black: PlayerLine::from_player(&record.players.black),
            winner: record.winner,
            status: GameStatus::from_code(status),
            move_count: count_moves(&record.moves),
            variant: record.variant.clone(),
            speed: record.speed.clone(),
        }
    }

    fn winner_and_loser(&self, winner: Side) -> (&PlayerLine, &PlayerLine) {
        match winner {
            Side::White => (&self.white, &self.black),
            Side::Black => (&self.black, &self.white),
        }
    }
}

impl fmt::Display for GameSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.winner {
            Some(side) => {
                let (winner, loser) = self.winner_and_loser(side);
                write!(
                    f,
                    "{} wins vs {} {} in {} moves in {} game. Time control {}",
                    winner,
                    loser,
                    self.status.phrase(),
                    self.move_count,
                    self.variant,
                    self.speed
                )
            }
            None => write!(
                f,
                "Game between {} and {} ended {} in {} moves.",
                self.white,
                self.black,
                self.status.phrase(),
                self.move_count
            ),
        }
    }
}

/// Full moves from a space separated list of half-moves
fn count_moves(moves: &str) -> usize {
    moves.split_whitespace().count() / 2
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{GamePlayers, LightUser};

    fn forty_two_half_moves() -> String {
        vec!["e4"; 42].join(" ")
    }

    fn record(winner: Option<Side>, status: &str) -> GameRecord {
        GameRecord {
            players: GamePlayers {
                white: GamePlayer {
                    user: LightUser { name: "Evgeniy1989".to_string() },
                    rating: Some(1500),
                },
                black: GamePlayer {
                    user: LightUser { name: "Viposha".to_string() },
                    rating: Some(1400),
                },
            },
            winner,
            status: Some(status.to_string()),
            moves: forty_two_half_moves(),
            variant: "standard".to_string(),
            speed: "blitz".to_string(),
        }
    }

    #[test]
    fn test_white_win_summary() {
        let summary = GameSummary::from_record(&record(Some(Side::White), "mate"));
        assert_eq!(
            summary.to_string(),
            "Evgeniy1989 (1500) wins vs Viposha (1400) by checkmate in 21 moves in standard game. Time control blitz"
        );
    }

    #[test]
    fn test_black_win_puts_black_first() {
        let summary = GameSummary::from_record(&record(Some(Side::Black), "resign"));
        assert_eq!(
            summary.to_string(),
            "Viposha (1400) wins vs Evgeniy1989 (1500) by resignation in 21 moves in standard game. Time control blitz"
        );
    }

    #[test]
    fn test_draw_summary() {
        let summary = GameSummary::from_record(&record(None, "draw"));
        assert_eq!(
            summary.to_string(),
            "Game between Evgeniy1989 (1500) and Viposha (1400) ended drawn in 21 moves."
        );
    }

    #[test]
    fn test_unmapped_status_is_shown_raw() {
        let summary = GameSummary::from_record(&record(None, "insufficientMaterialClaim"));
        assert!(summary.to_string().contains("ended insufficientMaterialClaim in"));
    }

    #[test]
    fn test_missing_rating_and_status() {
        let mut game = record(None, "draw");
        game.status = None;
        game.players.black.rating = None;
        game.moves = "e4 e5 Nf3".to_string();

        let summary = GameSummary::from_record(&game);
        assert_eq!(summary.status, GameStatus::UnknownFinish);
        assert_eq!(
            summary.to_string(),
            "Game between Evgeniy1989 (1500) and Viposha (N/A) ended finished (reason unknown) in 1 moves."
        );
    }
}
