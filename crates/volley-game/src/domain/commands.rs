//! Commands for a game entity.

use tokio::sync::oneshot;

use volley_directory::domain::aggregates::GameInfo;
use volley_physics::GameState;

/// Commands accepted by one game entity's mailbox.
///
/// All four share the same serialization domain: a tick never runs
/// concurrently with a move or a start for the same game.
#[derive(Debug)]
pub enum GameCommand {
    /// Begin the game between the info's two participants.
    Start {
        info: GameInfo,
        at_ms: i64,
        reply: oneshot::Sender<Option<GameState>>,
    },
    /// Point one player's paddle at a new target. Always acknowledged,
    /// even when it has no observable effect.
    MovePaddle {
        user_id: String,
        target_y: f32,
        reply: oneshot::Sender<()>,
    },
    /// Advance the simulation to the given timestamp.
    AdvanceTick {
        at_ms: i64,
        reply: oneshot::Sender<Option<GameState>>,
    },
    /// Read-only snapshot.
    GetState {
        reply: oneshot::Sender<Option<GameState>>,
    },
}
