use crate::config::{find_player, TrackedPlayer};
use crate::domain::RatingCategory;
use crate::errors::FlowError;

const SELECT_PLAYER: &str = "select_player_";
const SELECT_RATING: &str = "select_rating_";
const LAST_PLAYER: &str = "last_player_";

/// Slash commands the bot answers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Live,
    Rating,
    Graph,
    Last,
}

impl Command {
    /// Parse the first word of a message, e.g. `/graph` or `/graph@SomeBot`.
    /// Commands addressed to a different bot are ignored.
    pub fn parse(text: &str, own_username: Option<&str>) -> Option<Self> {
        let word = text.split_whitespace().next()?;
        let word = word.strip_prefix('/')?;
        let (name, addressee) = match word.split_once('@') {
            Some((name, addressee)) => (name, Some(addressee)),
            None => (word, None),
        };

        if let (Some(addressee), Some(own)) = (addressee, own_username) {
            if !addressee.eq_ignore_ascii_case(own) {
                return None;
            }
        }

        match name.to_ascii_lowercase().as_str() {
            "start" => Some(Self::Start),
            "live" => Some(Self::Live),
            "rating" => Some(Self::Rating),
            "graph" => Some(Self::Graph),
            "last" => Some(Self::Last),
            _ => None,
        }
    }
}

/// Inline keyboard button payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    SelectPlayer(TrackedPlayer),
    SelectRating(RatingCategory),
    LastGame(TrackedPlayer),
}

impl CallbackAction {
    /// Decode callback data; players and categories must come from the closed sets
    pub fn parse(data: &str) -> Result<Self, FlowError> {
        if let Some(name) = data.strip_prefix(SELECT_PLAYER) {
            return tracked(name).map(Self::SelectPlayer);
        }
        if let Some(label) = data.strip_prefix(SELECT_RATING) {
            return label.parse().map(Self::SelectRating);
        }
        if let Some(name) = data.strip_prefix(LAST_PLAYER) {
            return tracked(name).map(Self::LastGame);
        }
        Err(FlowError::UnknownCallback(data.to_string()))
    }

    pub fn to_data(self) -> String {
        match self {
            Self::SelectPlayer(player) => format!("{}{}", SELECT_PLAYER, player.nickname),
            Self::SelectRating(category) => format!("{}{}", SELECT_RATING, category.label()),
            Self::LastGame(player) => format!("{}{}", LAST_PLAYER, player.nickname),
        }
    }
}

fn tracked(name: &str) -> Result<TrackedPlayer, FlowError> {
    find_player(name).ok_or_else(|| FlowError::UnknownPlayer(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parsing() {
        let own = Some("ChessRatingBot");
        assert_eq!(Command::parse("/start", own), Some(Command::Start));
        assert_eq!(Command::parse("/graph@ChessRatingBot", own), Some(Command::Graph));
        assert_eq!(Command::parse("/LIVE now", own), Some(Command::Live));
        assert_eq!(Command::parse("live", own), None);
        assert_eq!(Command::parse("/unknown", own), None);
        assert_eq!(Command::parse("", own), None);
    }

    #[test]
    fn test_commands_for_other_bots_are_ignored() {
        assert_eq!(Command::parse("/graph@OtherBot", Some("ChessRatingBot")), None);
        assert_eq!(Command::parse("/graph@chessratingbot", Some("ChessRatingBot")), Some(Command::Graph));
        assert_eq!(Command::parse("/graph@OtherBot", None), Some(Command::Graph));
    }

    #[test]
    fn test_callback_round_trip_through_keyboard_data() {
        let player = find_player("Viposha").unwrap();
        for action in [
            CallbackAction::SelectPlayer(player),
            CallbackAction::SelectRating(RatingCategory::Rapid),
            CallbackAction::LastGame(player),
        ] {
            assert_eq!(CallbackAction::parse(&action.to_data()), Ok(action));
        }
    }

    #[test]
    fn test_callback_rejects_values_outside_closed_sets() {
        assert_eq!(
            CallbackAction::parse("select_player_Mallory"),
            Err(FlowError::UnknownPlayer("Mallory".to_string()))
        );
        assert_eq!(
            CallbackAction::parse("select_rating_Blitz FROM rating; DROP TABLE rating"),
            Err(FlowError::UnknownCategory(
                "Blitz FROM rating; DROP TABLE rating".to_string()
            ))
        );
        assert_eq!(
            CallbackAction::parse("something_else"),
            Err(FlowError::UnknownCallback("something_else".to_string()))
        );
    }
}
