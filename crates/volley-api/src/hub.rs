//! Broadcast hub — per-game fan-out of tick snapshots.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::broadcast;
use volley_physics::GameState;

/// Per-subscriber buffer capacity. A subscriber that falls this far behind
/// skips ticks (`RecvError::Lagged`) instead of blocking the publisher.
const CHANNEL_CAPACITY: usize = 64;

/// One broadcast channel per game id, created lazily on first publish or
/// first subscribe.
///
/// Publishing is fire-and-forget: a tick with no subscribers is dropped,
/// and a late subscriber sees only future ticks — no history replay. All
/// subscribers to one game observe the same ticks in the same order.
#[derive(Clone, Default)]
pub struct BroadcastHub {
    channels: Arc<Mutex<HashMap<String, broadcast::Sender<GameState>>>>,
}

impl BroadcastHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn sender(&self, game_id: &str) -> broadcast::Sender<GameState> {
        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        channels
            .entry(game_id.to_owned())
            .or_insert_with(|| broadcast::channel(CHANNEL_CAPACITY).0)
            .clone()
    }

    /// Delivers `snapshot` to every current subscriber of the game.
    pub fn publish(&self, game_id: &str, snapshot: GameState) {
        // send only errors when nobody is subscribed; the tick is dropped.
        let _ = self.sender(game_id).send(snapshot);
    }

    /// Subscribes to the game's future ticks.
    #[must_use]
    pub fn subscribe(&self, game_id: &str) -> broadcast::Receiver<GameState> {
        self.sender(game_id).subscribe()
    }
}
