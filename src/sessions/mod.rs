use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::config::TrackedPlayer;

/// Chat user identifier as Telegram reports it
pub type UserId = i64;

struct Selection {
    player: TrackedPlayer,
    selected_at: Instant,
}

/// Short-lived per-user state of the `/graph` flow
///
/// A selection expires after the TTL; expired entries read as absent and are
/// dropped on every write, so the map stays bounded by recent users.
pub struct SessionStore {
    ttl: Duration,
    selections: HashMap<UserId, Selection>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            selections: HashMap::new(),
        }
    }

    /// Remember the player a user picked, replacing any earlier pick
    pub fn select_player(&mut self, user: UserId, player: TrackedPlayer) {
        self.purge_expired();
        self.selections.insert(
            user,
            Selection {
                player,
                selected_at: Instant::now(),
            },
        );
    }

    pub fn selected_player(&self, user: UserId) -> Option<TrackedPlayer> {
        self.selections
            .get(&user)
            .filter(|selection| !self.is_expired(selection))
            .map(|selection| selection.player)
    }

    /// Drop a user's selection, e.g. when the flow restarts
    pub fn forget(&mut self, user: UserId) {
        self.selections.remove(&user);
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.selections.len()
    }

    /// Drop expired selections, returning how many were removed
    pub fn purge_expired(&mut self) -> usize {
        let before = self.selections.len();
        let ttl = self.ttl;
        self.selections
            .retain(|_, selection| selection.selected_at.elapsed() < ttl);

        let removed = before - self.selections.len();
        if removed > 0 {
            debug!("Purged {} expired selections", removed);
        }
        removed
    }

    fn is_expired(&self, selection: &Selection) -> bool {
        selection.selected_at.elapsed() >= self.ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIPOSHA: TrackedPlayer = TrackedPlayer::new("Viposha");
    const IVAN: TrackedPlayer = TrackedPlayer::new("Pyrog_Ivan");

    #[test]
    fn test_selection_is_per_user() {
        let mut store = SessionStore::new(Duration::from_secs(600));
        store.select_player(1, VIPOSHA);
        store.select_player(2, IVAN);

        assert_eq!(store.selected_player(1), Some(VIPOSHA));
        assert_eq!(store.selected_player(2), Some(IVAN));
        assert_eq!(store.selected_player(3), None);
    }

    #[test]
    fn test_new_selection_replaces_old() {
        let mut store = SessionStore::new(Duration::from_secs(600));
        store.select_player(1, VIPOSHA);
        store.select_player(1, IVAN);

        assert_eq!(store.selected_player(1), Some(IVAN));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_expired_selection_reads_as_absent_and_is_purged() {
        let mut store = SessionStore::new(Duration::ZERO);
        store.select_player(1, VIPOSHA);
        assert_eq!(store.selected_player(1), None);

        store.select_player(2, IVAN);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_forget() {
        let mut store = SessionStore::new(Duration::from_secs(600));
        store.select_player(1, VIPOSHA);
        store.forget(1);
        assert_eq!(store.selected_player(1), None);
        assert_eq!(store.len(), 0);
    }
}
