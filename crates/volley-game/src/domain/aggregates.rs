//! Aggregate root for one running game.

use volley_directory::domain::aggregates::{GameInfo, MAX_PLAYERS};
use volley_physics::{GameState, advance};

/// The aggregate root for one game's authoritative state.
///
/// A session is Running iff `state` is present. Each instance is owned by
/// its mailbox worker; every method here runs inside that worker, one
/// command at a time, so a tick can never overlap a paddle move.
#[derive(Debug, Default)]
pub struct GameSession {
    state: Option<GameState>,
    last_tick_ms: i64,
}

impl GameSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Transitions to Running, serving the ball between `info`'s two
    /// participants.
    ///
    /// Requires exactly two participants; otherwise `None`. Idempotent:
    /// starting an already-running session returns the existing state
    /// untouched.
    pub fn start(&mut self, info: &GameInfo, at_ms: i64) -> Option<GameState> {
        if let Some(state) = &self.state {
            return Some(state.clone());
        }
        if info.players.len() != MAX_PLAYERS {
            return None;
        }
        let state = GameState::serve(info.players[0].clone(), info.players[1].clone());
        self.state = Some(state.clone());
        self.last_tick_ms = at_ms;
        Some(state)
    }

    /// Points `user_id`'s paddle at `target_y`.
    ///
    /// Silent no-op when the session is not running or the user is not one
    /// of the two players; clamping to table bounds is the physics step's
    /// job, not done here.
    pub fn move_paddle(&mut self, user_id: &str, target_y: f32) {
        let Some(state) = &mut self.state else {
            return;
        };
        if state.players.0.id == user_id {
            state.players.0.paddle_y = target_y;
        } else if state.players.1.id == user_id {
            state.players.1.paddle_y = target_y;
        }
    }

    /// Advances the simulation to `at_ms` and returns the new snapshot,
    /// or `None` when the session is not running.
    ///
    /// Elapsed time is floored at zero, so timestamps arriving out of
    /// order can never rewind the game.
    pub fn advance_tick(&mut self, at_ms: i64) -> Option<GameState> {
        let state = self.state.as_ref()?;
        let elapsed = (at_ms - self.last_tick_ms).max(0);
        let next = advance(state, elapsed);
        self.state = Some(next.clone());
        self.last_tick_ms = at_ms;
        Some(next)
    }

    /// Read-only snapshot, `None` when the session is not running.
    #[must_use]
    pub fn state(&self) -> Option<GameState> {
        self.state.clone()
    }
}
