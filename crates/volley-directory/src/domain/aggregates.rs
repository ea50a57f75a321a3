//! Aggregate root for the session directory.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum participants per game.
pub const MAX_PLAYERS: usize = 2;

/// Lifecycle of one game session as the directory sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Waiting for a second participant.
    Open,
    /// Two participants present, game entity not yet confirmed running.
    Full,
    /// The game entity produced its initial state and is being ticked.
    Started,
}

/// Directory metadata for one game session. Immutable snapshot — callers
/// never receive a live reference into the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    /// Unique id, generated at creation, immutable afterwards.
    pub id: String,
    pub name: String,
    pub status: GameStatus,
    /// Ordered, distinct participant ids; never more than [`MAX_PLAYERS`].
    pub players: Vec<String>,
}

/// The aggregate root for the directory of game sessions.
///
/// Exactly one instance exists, owned by its mailbox worker; every method
/// here runs inside that worker, one command at a time.
#[derive(Debug, Default)]
pub struct GamesRegistry {
    games: HashMap<String, GameInfo>,
}

impl GamesRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every known game, unspecified order.
    #[must_use]
    pub fn list(&self) -> Vec<GameInfo> {
        self.games.values().cloned().collect()
    }

    /// Registers a new open game with the creator as its first participant.
    ///
    /// A blank name is a precondition failure and yields `None`.
    pub fn create(&mut self, name: &str, creator: &str) -> Option<GameInfo> {
        if name.trim().is_empty() {
            return None;
        }
        let info = GameInfo {
            id: Uuid::new_v4().to_string(),
            name: name.to_owned(),
            status: GameStatus::Open,
            players: vec![creator.to_owned()],
        };
        self.games.insert(info.id.clone(), info.clone());
        Some(info)
    }

    /// Appends `user_id` to the game's participants.
    ///
    /// Yields `None` when the id is unknown, the game is already full, or
    /// the user already joined. The second distinct participant flips the
    /// status to [`GameStatus::Full`].
    pub fn join(&mut self, game_id: &str, user_id: &str) -> Option<GameInfo> {
        let info = self.games.get_mut(game_id)?;
        if info.players.len() >= MAX_PLAYERS || info.players.iter().any(|p| p == user_id) {
            return None;
        }
        info.players.push(user_id.to_owned());
        if info.players.len() == MAX_PLAYERS {
            info.status = GameStatus::Full;
        }
        Some(info.clone())
    }

    /// Records that the game entity confirmed its initial state.
    pub fn mark_started(&mut self, game_id: &str) {
        if let Some(info) = self.games.get_mut(game_id) {
            info.status = GameStatus::Started;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_assigns_distinct_ids_and_open_status() {
        let mut registry = GamesRegistry::new();

        let a = registry.create("A", "alice").unwrap();
        let b = registry.create("B", "alice").unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(a.status, GameStatus::Open);
        assert_eq!(b.status, GameStatus::Open);
        assert_eq!(a.players, vec!["alice".to_owned()]);
    }

    #[test]
    fn test_create_rejects_blank_name() {
        let mut registry = GamesRegistry::new();

        assert!(registry.create("", "alice").is_none());
        assert!(registry.create("   ", "alice").is_none());
        assert!(registry.list().is_empty());
    }

    #[test]
    fn test_second_participant_fills_the_game() {
        let mut registry = GamesRegistry::new();
        let game = registry.create("A", "alice").unwrap();

        let joined = registry.join(&game.id, "bob").unwrap();

        assert_eq!(joined.status, GameStatus::Full);
        assert_eq!(joined.players, vec!["alice".to_owned(), "bob".to_owned()]);
    }

    #[test]
    fn test_join_on_full_game_returns_none() {
        let mut registry = GamesRegistry::new();
        let game = registry.create("A", "alice").unwrap();
        registry.join(&game.id, "bob").unwrap();

        assert!(registry.join(&game.id, "carol").is_none());
    }

    #[test]
    fn test_duplicate_join_returns_none() {
        let mut registry = GamesRegistry::new();
        let game = registry.create("A", "alice").unwrap();

        assert!(registry.join(&game.id, "alice").is_none());
        assert_eq!(registry.list()[0].players.len(), 1);
    }

    #[test]
    fn test_join_on_unknown_id_returns_none() {
        let mut registry = GamesRegistry::new();

        assert!(registry.join("no-such-game", "bob").is_none());
    }

    #[test]
    fn test_participant_count_never_exceeds_two_or_decreases() {
        let mut registry = GamesRegistry::new();
        let game = registry.create("A", "alice").unwrap();

        let users = ["bob", "carol", "dave", "alice", "bob"];
        let mut last_count = 1;
        for user in users {
            let _ = registry.join(&game.id, user);
            let count = registry.list()[0].players.len();
            assert!(count <= MAX_PLAYERS);
            assert!(count >= last_count);
            last_count = count;
        }
    }

    #[test]
    fn test_mark_started_flips_status() {
        let mut registry = GamesRegistry::new();
        let game = registry.create("A", "alice").unwrap();
        registry.join(&game.id, "bob").unwrap();

        registry.mark_started(&game.id);

        assert_eq!(registry.list()[0].status, GameStatus::Started);
    }

    #[test]
    fn test_mark_started_on_unknown_id_is_a_no_op() {
        let mut registry = GamesRegistry::new();

        registry.mark_started("no-such-game");

        assert!(registry.list().is_empty());
    }
}
