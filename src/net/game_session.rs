//! Tick driver - runs a room on the fixed-rate clock and publishes its messages

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::game::constants::world;
use crate::game::scheduler::{TickClock, TickDecision};
use crate::lobby::room::GameRoom;
use crate::net::protocol::ServerMessage;

/// Capacity of the outbound channel; slow subscribers lag rather than block the tick
pub const OUTBOUND_CAPACITY: usize = 256;

pub fn outbound_channel() -> (broadcast::Sender<ServerMessage>, broadcast::Receiver<ServerMessage>) {
    broadcast::channel(OUTBOUND_CAPACITY)
}

/// Start the game loop background task for one room
///
/// Each tick takes the room's write lock, so input applied through the same lock
/// always lands between ticks. Messages are published after the lock is released.
pub fn start_game_loop(
    room: Arc<RwLock<GameRoom>>,
    outbound: broadcast::Sender<ServerMessage>,
    stats_interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let period = Duration::from_micros(world::TICK_DURATION_US);
        let start = Instant::now();
        let mut clock = TickClock::new(period, start.into_std());
        let mut last_stats = start;

        info!("Game loop started at {} Hz", world::TICK_RATE);

        loop {
            let (tick, skipped) = match clock.poll(Instant::now().into_std()) {
                TickDecision::Wait(delay) => {
                    tokio::time::sleep(delay).await;
                    continue;
                }
                TickDecision::Run { tick, skipped } => (tick, skipped),
            };

            if skipped > 0 {
                warn!("Tick {} ran late, skipped {} ticks", tick, skipped);
            }

            let tick_start = Instant::now();
            let messages = room.write().await.update();
            clock.record_tick_cost(tick_start.elapsed());

            for message in messages {
                // No subscribers is not an error
                let _ = outbound.send(message);
            }

            if last_stats.elapsed() >= stats_interval {
                last_stats = Instant::now();
                let room = room.read().await;
                let session = room.session();
                info!(
                    "Room '{}': {}s, tick {}, level {}, score {}, {} players, {} bouncers | avg tick {:?} ({:.1}%), {} skipped",
                    room.name,
                    start.elapsed().as_secs(),
                    session.tick,
                    session.level,
                    session.score,
                    session.player_count(),
                    session.bouncers.len(),
                    clock.average_tick_cost(),
                    clock.budget_usage_percent(),
                    clock.skipped_total()
                );
            }
        }
    })
}
