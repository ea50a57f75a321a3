//! Commands for the directory entity.

use tokio::sync::oneshot;

use super::aggregates::GameInfo;

/// Commands accepted by the directory entity's mailbox.
///
/// Replies travel over the embedded channels; expected absences (unknown
/// id, full game, duplicate join) are `None`, never an error.
#[derive(Debug)]
pub enum DirectoryCommand {
    /// Snapshot of every known game.
    List {
        reply: oneshot::Sender<Vec<GameInfo>>,
    },
    /// Register a new open game.
    Create {
        name: String,
        creator: String,
        reply: oneshot::Sender<Option<GameInfo>>,
    },
    /// Append a participant to an existing game.
    Join {
        game_id: String,
        user_id: String,
        reply: oneshot::Sender<Option<GameInfo>>,
    },
    /// Internal notification from the join chain: the game entity
    /// confirmed its initial state. Not part of the RPC surface.
    MarkStarted { game_id: String },
}
