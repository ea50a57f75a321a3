//! Command handling for game entities.
//!
//! Each game id gets its own mailbox worker, spawned lazily by
//! [`GameEntities::ref_for`] the first time anything addresses that id —
//! the same contract the directory's callers rely on: commands for one
//! game execute in arrival order, different games never block each other.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use volley_core::entity::{EntityRef, EntityState};
use volley_core::error::DomainError;
use volley_directory::domain::aggregates::GameInfo;
use volley_physics::GameState;

use crate::domain::aggregates::GameSession;
use crate::domain::commands::GameCommand;

impl EntityState for GameSession {
    type Command = GameCommand;

    fn handle(&mut self, command: Self::Command) {
        match command {
            GameCommand::Start { info, at_ms, reply } => {
                let _ = reply.send(self.start(&info, at_ms));
            }
            GameCommand::MovePaddle {
                user_id,
                target_y,
                reply,
            } => {
                self.move_paddle(&user_id, target_y);
                let _ = reply.send(());
            }
            GameCommand::AdvanceTick { at_ms, reply } => {
                let _ = reply.send(self.advance_tick(at_ms));
            }
            GameCommand::GetState { reply } => {
                let _ = reply.send(self.state());
            }
        }
    }
}

/// Typed client for one game entity.
#[derive(Clone)]
pub struct GameHandle {
    entity: EntityRef<GameCommand>,
}

impl GameHandle {
    fn spawn() -> Self {
        Self {
            entity: EntityRef::spawn(GameSession::new()),
        }
    }

    /// Begins the game; idempotent, `None` without two participants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn start(&self, info: GameInfo, at_ms: i64) -> Result<Option<GameState>, DomainError> {
        self.entity
            .ask(|reply| GameCommand::Start { info, at_ms, reply })
            .await
    }

    /// Points the user's paddle at a target; acknowledged even when it has
    /// no observable effect.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn move_paddle(&self, user_id: &str, target_y: f32) -> Result<(), DomainError> {
        let user_id = user_id.to_owned();
        self.entity
            .ask(|reply| GameCommand::MovePaddle {
                user_id,
                target_y,
                reply,
            })
            .await
    }

    /// Advances the simulation; `None` when the game is not running.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn advance_tick(&self, at_ms: i64) -> Result<Option<GameState>, DomainError> {
        self.entity
            .ask(|reply| GameCommand::AdvanceTick { at_ms, reply })
            .await
    }

    /// Read-only snapshot; `None` when the game is not running.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn state(&self) -> Result<Option<GameState>, DomainError> {
        self.entity.ask(|reply| GameCommand::GetState { reply }).await
    }
}

/// Registry of game entities, keyed by game id.
#[derive(Clone, Default)]
pub struct GameEntities {
    handles: Arc<Mutex<HashMap<String, GameHandle>>>,
}

impl GameEntities {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle for the entity owning `game_id`, spawning its worker on
    /// first use. Addressing an id nobody started is fine: the fresh
    /// entity answers state queries and ticks with `None`.
    pub async fn ref_for(&self, game_id: &str) -> GameHandle {
        let mut handles = self.handles.lock().await;
        handles
            .entry(game_id.to_owned())
            .or_insert_with(GameHandle::spawn)
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use volley_directory::domain::aggregates::GameStatus;

    fn full_info(id: &str) -> GameInfo {
        GameInfo {
            id: id.to_owned(),
            name: "A".to_owned(),
            status: GameStatus::Full,
            players: vec!["alice".to_owned(), "bob".to_owned()],
        }
    }

    #[tokio::test]
    async fn test_ref_for_returns_the_same_entity_for_one_id() {
        let games = GameEntities::new();

        let first = games.ref_for("g-1").await;
        first.start(full_info("g-1"), 1_000).await.unwrap();

        let second = games.ref_for("g-1").await;
        assert!(second.state().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_distinct_ids_get_distinct_entities() {
        let games = GameEntities::new();

        let one = games.ref_for("g-1").await;
        one.start(full_info("g-1"), 1_000).await.unwrap();

        let other = games.ref_for("g-2").await;
        assert!(other.state().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_tick_on_an_unstarted_entity_returns_none() {
        let games = GameEntities::new();

        let handle = games.ref_for("g-unknown").await;

        assert!(handle.advance_tick(1_000).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_moves_and_ticks_serialize_per_game() {
        let games = GameEntities::new();
        let handle = games.ref_for("g-1").await;
        handle.start(full_info("g-1"), 0).await.unwrap();

        let movers: Vec<_> = (0..8u8)
            .map(|i| {
                let handle = handle.clone();
                tokio::spawn(async move {
                    handle.move_paddle("alice", 100.0 + f32::from(i)).await
                })
            })
            .collect();
        let ticker = {
            let handle = handle.clone();
            tokio::spawn(async move {
                for at_ms in (50..=400).step_by(50) {
                    handle.advance_tick(at_ms).await.unwrap();
                }
            })
        };
        for mover in movers {
            mover.await.unwrap().unwrap();
        }
        ticker.await.unwrap();

        // Whatever the interleaving, the final paddle target is one of the
        // requested values, clamped by the physics step.
        let state = handle.state().await.unwrap().unwrap();
        assert!((100.0..=107.0).contains(&state.players.0.paddle_y));
    }
}
