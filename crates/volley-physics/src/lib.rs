//! Volley Physics — table model and the pure simulation step.
//!
//! Everything here is pure data and pure functions: [`advance`] maps a
//! [`GameState`] plus an elapsed duration to the next state. The session
//! entity owns the state and the timestamps; this crate never sees a clock.
//!
//! Coordinates are in table units: x grows rightward across the table,
//! y grows downward, origin at the top-left corner.

use serde::{Deserialize, Serialize};

/// Table width in table units.
pub const TABLE_WIDTH: f32 = 800.0;
/// Table height in table units.
pub const TABLE_HEIGHT: f32 = 600.0;
/// Height of each paddle.
pub const PADDLE_HEIGHT: f32 = 120.0;
/// Distance of each paddle's contact plane from its own wall. The first
/// player defends the left plane, the second the right plane.
pub const PADDLE_PLANE_X: f32 = 30.0;
/// Horizontal speed of a freshly served ball, table units per second.
pub const SERVE_SPEED_X: f32 = 240.0;
/// Vertical speed of a freshly served ball, table units per second.
pub const SERVE_SPEED_Y: f32 = 90.0;

/// The ball: position and velocity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
}

/// One player: identity, paddle position, and accumulated score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// The authenticated principal controlling this paddle.
    pub id: String,
    /// Vertical center of the paddle.
    pub paddle_y: f32,
    pub score: u32,
}

impl Player {
    fn at_center(id: String) -> Self {
        Self {
            id,
            paddle_y: TABLE_HEIGHT / 2.0,
            score: 0,
        }
    }
}

/// Snapshot of one game: the ball and exactly two players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub ball: Ball,
    /// Fixed arity: the left defender first, the right defender second.
    pub players: (Player, Player),
}

impl GameState {
    /// Opening state: ball at the table center moving with the fixed
    /// serving velocity, both paddles at center height, scores zeroed.
    #[must_use]
    pub fn serve(first: String, second: String) -> Self {
        Self {
            ball: serve_ball(1.0),
            players: (Player::at_center(first), Player::at_center(second)),
        }
    }
}

/// A ball re-served from the center, heading toward the side given by
/// `direction` (`1.0` → right, `-1.0` → left).
fn serve_ball(direction: f32) -> Ball {
    Ball {
        x: TABLE_WIDTH / 2.0,
        y: TABLE_HEIGHT / 2.0,
        vx: SERVE_SPEED_X * direction,
        vy: SERVE_SPEED_Y,
    }
}

fn clamp_paddle(y: f32) -> f32 {
    y.clamp(PADDLE_HEIGHT / 2.0, TABLE_HEIGHT - PADDLE_HEIGHT / 2.0)
}

fn paddle_blocks(paddle_y: f32, ball_y: f32) -> bool {
    (ball_y - paddle_y).abs() <= PADDLE_HEIGHT / 2.0
}

/// Advances `state` by `elapsed_ms`, returning the next state.
///
/// Handles paddle clamping, wall reflection, paddle bounces, and scoring.
/// A non-positive elapsed duration is an identity step for the ball, so
/// out-of-order tick timestamps can never rewind a game.
#[must_use]
pub fn advance(state: &GameState, elapsed_ms: i64) -> GameState {
    let dt = elapsed_ms.max(0) as f32 / 1000.0;

    let mut next = state.clone();
    next.players.0.paddle_y = clamp_paddle(next.players.0.paddle_y);
    next.players.1.paddle_y = clamp_paddle(next.players.1.paddle_y);

    let ball = &mut next.ball;
    ball.x += ball.vx * dt;
    ball.y += ball.vy * dt;

    // Top and bottom walls reflect.
    if ball.y < 0.0 {
        ball.y = -ball.y;
        ball.vy = -ball.vy;
    } else if ball.y > TABLE_HEIGHT {
        ball.y = 2.0 * TABLE_HEIGHT - ball.y;
        ball.vy = -ball.vy;
    }

    // Paddle planes bounce the ball back when blocked; a miss that carries
    // past the wall scores for the opposite side and re-serves toward the
    // conceder.
    let right_plane = TABLE_WIDTH - PADDLE_PLANE_X;
    if ball.vx < 0.0 && ball.x <= PADDLE_PLANE_X {
        if paddle_blocks(next.players.0.paddle_y, ball.y) {
            ball.x = 2.0 * PADDLE_PLANE_X - ball.x;
            ball.vx = -ball.vx;
        } else if ball.x < 0.0 {
            next.players.1.score += 1;
            *ball = serve_ball(-1.0);
        }
    } else if ball.vx > 0.0 && ball.x >= right_plane {
        if paddle_blocks(next.players.1.paddle_y, ball.y) {
            ball.x = 2.0 * right_plane - ball.x;
            ball.vx = -ball.vx;
        } else if ball.x > TABLE_WIDTH {
            next.players.0.score += 1;
            *ball = serve_ball(1.0);
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running_state() -> GameState {
        GameState::serve("alice".to_owned(), "bob".to_owned())
    }

    #[test]
    fn test_serve_centers_ball_and_paddles() {
        let state = running_state();

        assert_eq!(state.ball.x, TABLE_WIDTH / 2.0);
        assert_eq!(state.ball.y, TABLE_HEIGHT / 2.0);
        assert_eq!(state.ball.vx, SERVE_SPEED_X);
        assert_eq!(state.ball.vy, SERVE_SPEED_Y);
        assert_eq!(state.players.0.paddle_y, TABLE_HEIGHT / 2.0);
        assert_eq!(state.players.1.paddle_y, TABLE_HEIGHT / 2.0);
        assert_eq!((state.players.0.score, state.players.1.score), (0, 0));
    }

    #[test]
    fn test_zero_elapsed_leaves_ball_untouched() {
        let state = running_state();

        let next = advance(&state, 0);

        assert_eq!(next.ball, state.ball);
    }

    #[test]
    fn test_negative_elapsed_is_treated_as_zero() {
        let state = running_state();

        let next = advance(&state, -250);

        assert_eq!(next.ball, state.ball);
    }

    #[test]
    fn test_ball_moves_with_velocity() {
        let state = running_state();

        let next = advance(&state, 500);

        assert_eq!(next.ball.x, state.ball.x + SERVE_SPEED_X * 0.5);
        assert_eq!(next.ball.y, state.ball.y + SERVE_SPEED_Y * 0.5);
    }

    #[test]
    fn test_top_wall_reflects_ball() {
        let mut state = running_state();
        state.ball = Ball {
            x: 400.0,
            y: 5.0,
            vx: 0.0,
            vy: -100.0,
        };

        let next = advance(&state, 100);

        assert_eq!(next.ball.y, 5.0);
        assert_eq!(next.ball.vy, 100.0);
    }

    #[test]
    fn test_blocked_ball_bounces_off_paddle() {
        let mut state = running_state();
        state.ball = Ball {
            x: PADDLE_PLANE_X + 10.0,
            y: TABLE_HEIGHT / 2.0,
            vx: -200.0,
            vy: 0.0,
        };

        let next = advance(&state, 100);

        // Crossed the plane by 10 units and was reflected back across it.
        assert_eq!(next.ball.x, PADDLE_PLANE_X + 10.0);
        assert_eq!(next.ball.vx, 200.0);
        assert_eq!((next.players.0.score, next.players.1.score), (0, 0));
    }

    #[test]
    fn test_missed_ball_scores_for_the_other_side_and_reserves() {
        let mut state = running_state();
        state.players.0.paddle_y = PADDLE_HEIGHT / 2.0;
        state.ball = Ball {
            x: 15.0,
            y: TABLE_HEIGHT - 10.0,
            vx: -400.0,
            vy: 0.0,
        };

        let next = advance(&state, 100);

        assert_eq!(next.players.1.score, 1);
        assert_eq!(next.players.0.score, 0);
        assert_eq!(next.ball.x, TABLE_WIDTH / 2.0);
        assert_eq!(next.ball.vx, -SERVE_SPEED_X);
    }

    #[test]
    fn test_paddles_are_clamped_to_table_bounds() {
        let mut state = running_state();
        state.players.0.paddle_y = -500.0;
        state.players.1.paddle_y = 5000.0;

        let next = advance(&state, 50);

        assert_eq!(next.players.0.paddle_y, PADDLE_HEIGHT / 2.0);
        assert_eq!(next.players.1.paddle_y, TABLE_HEIGHT - PADDLE_HEIGHT / 2.0);
    }
}
