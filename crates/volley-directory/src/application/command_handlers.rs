//! Command handling for the directory entity.
//!
//! The registry aggregate runs behind a single mailbox worker, so create
//! and join commands never interleave their reads and writes. The
//! [`DirectoryHandle`] is the typed client the API layer and the tick
//! driver talk to.

use volley_core::entity::{EntityRef, EntityState};
use volley_core::error::DomainError;

use crate::domain::aggregates::{GameInfo, GamesRegistry};
use crate::domain::commands::DirectoryCommand;

impl EntityState for GamesRegistry {
    type Command = DirectoryCommand;

    fn handle(&mut self, command: Self::Command) {
        match command {
            DirectoryCommand::List { reply } => {
                let _ = reply.send(self.list());
            }
            DirectoryCommand::Create {
                name,
                creator,
                reply,
            } => {
                let _ = reply.send(self.create(&name, &creator));
            }
            DirectoryCommand::Join {
                game_id,
                user_id,
                reply,
            } => {
                let _ = reply.send(self.join(&game_id, &user_id));
            }
            DirectoryCommand::MarkStarted { game_id } => self.mark_started(&game_id),
        }
    }
}

/// Typed client for the single directory entity.
#[derive(Clone)]
pub struct DirectoryHandle {
    entity: EntityRef<DirectoryCommand>,
}

impl DirectoryHandle {
    /// Spawns the directory worker with an empty registry.
    #[must_use]
    pub fn spawn() -> Self {
        Self {
            entity: EntityRef::spawn(GamesRegistry::new()),
        }
    }

    /// Snapshot of every known game.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn list(&self) -> Result<Vec<GameInfo>, DomainError> {
        self.entity.ask(|reply| DirectoryCommand::List { reply }).await
    }

    /// Registers a new open game; `None` for a blank name.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn create(&self, name: &str, creator: &str) -> Result<Option<GameInfo>, DomainError> {
        let name = name.to_owned();
        let creator = creator.to_owned();
        self.entity
            .ask(|reply| DirectoryCommand::Create {
                name,
                creator,
                reply,
            })
            .await
    }

    /// Appends a participant; `None` when the join precondition fails.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn join(&self, game_id: &str, user_id: &str) -> Result<Option<GameInfo>, DomainError> {
        let game_id = game_id.to_owned();
        let user_id = user_id.to_owned();
        self.entity
            .ask(|reply| DirectoryCommand::Join {
                game_id,
                user_id,
                reply,
            })
            .await
    }

    /// Records that the game entity confirmed its initial state.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EntityUnavailable`] if the worker is gone.
    pub async fn mark_started(&self, game_id: &str) -> Result<(), DomainError> {
        self.entity
            .tell(DirectoryCommand::MarkStarted {
                game_id: game_id.to_owned(),
            })
            .await
    }
}
