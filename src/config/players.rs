/// A Lichess account the bot follows
///
/// Profiles live at https://lichess.org/@/{nickname}. The bot only ever
/// offers, fetches and charts accounts from this list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackedPlayer {
    pub nickname: &'static str,
}

impl TrackedPlayer {
    pub const fn new(nickname: &'static str) -> Self {
        Self { nickname }
    }
}

/// Get the list of players shown in chat keyboards and snapshotted daily
pub fn get_players() -> Vec<TrackedPlayer> {
    vec![
        TrackedPlayer::new("Evgeniy1989"),
        TrackedPlayer::new("Pyrog_Ivan"),
        TrackedPlayer::new("Viposha"),
    ]
}

/// Look up a tracked player; Lichess names are case-insensitive
pub fn find_player(nickname: &str) -> Option<TrackedPlayer> {
    get_players()
        .into_iter()
        .find(|p| p.nickname.eq_ignore_ascii_case(nickname.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_player_returns_canonical_name() {
        let player = find_player("pyrog_ivan").unwrap();
        assert_eq!(player.nickname, "Pyrog_Ivan");
    }

    #[test]
    fn test_untracked_player() {
        assert!(find_player("DrNykterstein").is_none());
    }
}
