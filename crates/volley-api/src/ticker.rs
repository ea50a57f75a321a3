//! Tick driver — fixed-rate advancement of every active game.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;

use volley_directory::domain::aggregates::GameStatus;

use crate::state::AppState;

/// Default simulation period.
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Delay before the first firing, giving the directory worker time to
/// become reachable.
pub const STARTUP_DELAY: Duration = Duration::from_secs(1);

/// Spawns the single driver task. Started once at process start.
pub fn spawn(state: AppState, period: Duration, startup_delay: Duration) -> JoinHandle<()> {
    tokio::spawn(run(state, period, startup_delay))
}

async fn run(state: AppState, period: Duration, startup_delay: Duration) {
    tokio::time::sleep(startup_delay).await;
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;

        let games = match state.directory.list().await {
            Ok(games) => games,
            Err(error) => {
                // Skipped firing; the next period retries.
                warn!(%error, "game listing failed, skipping tick");
                continue;
            }
        };

        for info in games {
            if info.status == GameStatus::Open {
                continue;
            }
            // Each game ticks in its own task: one slow entity never
            // blocks the others, and an overlapping tick finishes late
            // rather than being cancelled.
            let handle = state.games.ref_for(&info.id).await;
            let hub = state.hub.clone();
            let at_ms = state.clock.millis();
            tokio::spawn(async move {
                match handle.advance_tick(at_ms).await {
                    Ok(Some(snapshot)) => hub.publish(&info.id, snapshot),
                    Ok(None) => {}
                    Err(error) => warn!(game_id = %info.id, %error, "tick failed"),
                }
            });
        }
    }
}
