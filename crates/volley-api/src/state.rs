//! Shared application state.

use std::sync::Arc;

use volley_auth::IdentityGate;
use volley_core::clock::Clock;
use volley_directory::application::command_handlers::DirectoryHandle;
use volley_game::application::command_handlers::GameEntities;

use crate::hub::BroadcastHub;

/// Application state shared across all request handlers and the tick
/// driver. Entities are reached through their handles only; no handler
/// ever touches entity state directly.
#[derive(Clone)]
pub struct AppState {
    /// Bearer-credential gate in front of the RPC surface.
    pub gate: IdentityGate,
    /// The single directory entity.
    pub directory: DirectoryHandle,
    /// Per-game entities, spawned lazily.
    pub games: GameEntities,
    /// Per-game tick fan-out.
    pub hub: BroadcastHub,
    /// Time source for entity timestamps.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create new application state with fresh entities and an empty hub.
    #[must_use]
    pub fn new(gate: IdentityGate, clock: Arc<dyn Clock>) -> Self {
        Self {
            gate,
            directory: DirectoryHandle::spawn(),
            games: GameEntities::new(),
            hub: BroadcastHub::new(),
            clock,
        }
    }
}
