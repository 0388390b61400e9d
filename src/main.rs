use std::sync::Arc;

use anyhow::Context;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use split_shot_server::config::ServerConfig;
use split_shot_server::game::autopilot;
use split_shot_server::game::state::PlayerId;
use split_shot_server::lobby::manager::LobbyManager;
use split_shot_server::lobby::room::GameRoom;
use split_shot_server::net::game_session::{outbound_channel, start_game_loop};
use split_shot_server::net::protocol::{GameEvent, ServerMessage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    info!("Split Shot Server v{}", env!("CARGO_PKG_VERSION"));

    let config = ServerConfig::load_or_default();
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;
    info!(
        "Configuration loaded: max_rooms={}, seed={:?}, snapshot_interval={}, headless_players={}",
        config.max_rooms, config.rng_seed, config.snapshot_interval, config.headless_players
    );

    let mut lobby = LobbyManager::from_config(&config);
    let (room_id, pilots) = lobby
        .seat_together(config.headless_players)
        .context("Failed to seat autopilot players")?;
    // The driver task owns the room from here on
    let room = lobby
        .remove_room(room_id)
        .context("Headless room vanished from the lobby")?;
    info!("Running room '{}' ({})", room.name, room_id);
    let room = Arc::new(RwLock::new(room));
    if pilots.is_empty() {
        info!("No autopilot players; idling until Ctrl+C");
    }

    let (tx, rx) = outbound_channel();
    let driver = start_game_loop(room.clone(), tx, config.stats_interval());

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
    };

    tokio::select! {
        outcome = fly_autopilots(room.clone(), pilots, rx) => {
            match outcome {
                Some((score, level)) => info!("Game over: score {} at level {}", score, level),
                None => warn!("Outbound channel closed"),
            }
        }
        _ = shutdown => {
            info!("Shutting down...");
        }
    }

    driver.abort();
    info!("Server stopped");

    Ok(())
}

/// Steer the autopilot players after every snapshot until the game ends
async fn fly_autopilots(
    room: Arc<RwLock<GameRoom>>,
    pilots: Vec<PlayerId>,
    mut rx: broadcast::Receiver<ServerMessage>,
) -> Option<(u32, u32)> {
    loop {
        match rx.recv().await {
            Ok(ServerMessage::Snapshot(_)) => {
                let mut guard = room.write().await;
                for &pilot in &pilots {
                    for intent in autopilot::decide(guard.session(), pilot) {
                        if let Err(e) = guard.apply_intent(pilot, intent) {
                            debug!("Autopilot {}: {}", pilot, e);
                        }
                    }
                }
            }
            Ok(ServerMessage::Event(GameEvent::LevelAdvanced { level })) => {
                info!("Level {} reached", level);
            }
            Ok(ServerMessage::Event(GameEvent::GameOver { score, level })) => {
                return Some((score, level));
            }
            Ok(_) => {}
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!("Autopilot lagged behind by {} messages", missed);
            }
            Err(broadcast::error::RecvError::Closed) => return None,
        }
    }
}
