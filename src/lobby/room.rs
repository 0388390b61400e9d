use std::time::Instant;

use tracing::{debug, info};
use uuid::Uuid;

use crate::game::entities::Player;
use crate::game::game_loop::{GameLoop, GameLoopEvent, PlayerIntent};
use crate::game::rng::{self, RandomSource};
use crate::game::state::{PlayerId, Session};
use crate::net::protocol::{ClientMessage, GameEvent, GameSnapshot, InputAction, ServerMessage};

/// Room state, derived from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomState {
    /// No players
    Waiting,
    /// Session running
    Playing,
    /// Game over, players still connected
    Ended,
}

/// One two-player session plus its routing of client messages
pub struct GameRoom {
    pub id: Uuid,
    pub name: String,
    pub created_at: Instant,
    game_loop: GameLoop,
    /// Ticks between snapshots while running
    snapshot_interval: u64,
}

impl GameRoom {
    pub fn new(name: String, rng: Box<dyn RandomSource>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Instant::now(),
            game_loop: GameLoop::new(rng),
            snapshot_interval: 1,
        }
    }

    /// Room with a seeded RNG when `seed` is set
    pub fn with_seed(name: String, seed: Option<u64>) -> Self {
        Self::new(name, rng::from_seed(seed))
    }

    pub fn with_snapshot_interval(mut self, ticks: u64) -> Self {
        self.snapshot_interval = ticks.max(1);
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> RoomState {
        let session = self.game_loop.state();
        if session.players.is_empty() {
            RoomState::Waiting
        } else if session.running {
            RoomState::Playing
        } else {
            RoomState::Ended
        }
    }

    pub fn session(&self) -> &Session {
        self.game_loop.state()
    }

    pub fn session_mut(&mut self) -> &mut Session {
        self.game_loop.state_mut()
    }

    pub fn player_count(&self) -> usize {
        self.session().player_count()
    }

    pub fn is_full(&self) -> bool {
        self.session().is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.session().players.is_empty()
    }

    pub fn player_ids(&self) -> Vec<PlayerId> {
        self.session().players.iter().map(|p| p.id).collect()
    }

    /// Admit a new player into the first free slot
    pub fn join(&mut self) -> Result<PlayerId, RoomError> {
        let player_id = Uuid::new_v4();
        match self.game_loop.join(player_id) {
            Some(slot) => {
                info!("Player {} joined room '{}' in {:?} slot", player_id, self.name, slot);
                Ok(player_id)
            }
            None => {
                info!("Rejected join to room '{}': room full", self.name);
                Err(RoomError::RoomFull)
            }
        }
    }

    /// Apply a control change from `player_id`
    pub fn handle_input(
        &mut self,
        player_id: PlayerId,
        action: InputAction,
        pressed: bool,
    ) -> Result<(), RoomError> {
        if self.session().get_player(player_id).is_none() {
            return Err(RoomError::PlayerNotFound);
        }
        match action.intent(pressed) {
            Some(intent) => self.apply_intent(player_id, intent),
            None => Ok(()),
        }
    }

    pub fn apply_intent(
        &mut self,
        player_id: PlayerId,
        intent: PlayerIntent,
    ) -> Result<(), RoomError> {
        if self.game_loop.apply_intent(player_id, intent) {
            Ok(())
        } else {
            Err(RoomError::PlayerNotFound)
        }
    }

    pub fn leave(&mut self, player_id: PlayerId) -> Result<Player, RoomError> {
        let player = self
            .game_loop
            .leave(player_id)
            .ok_or(RoomError::PlayerNotFound)?;
        info!("Player {} left room '{}'", player_id, self.name);
        Ok(player)
    }

    /// Route a client message. `sender` is None until the connection has joined.
    /// Returns the messages to broadcast to the room.
    pub fn handle_message(
        &mut self,
        sender: Option<PlayerId>,
        message: ClientMessage,
    ) -> Vec<ServerMessage> {
        match (message, sender) {
            (ClientMessage::JoinRequest, _) => match self.join() {
                Ok(player_id) => self.join_notifications(player_id),
                Err(e) => vec![ServerMessage::JoinRejected {
                    reason: e.to_string(),
                }],
            },
            (ClientMessage::Input { action, pressed }, Some(player_id)) => {
                if let Err(e) = self.handle_input(player_id, action, pressed) {
                    debug!("Ignored input from {}: {}", player_id, e);
                }
                Vec::new()
            }
            (ClientMessage::Leave, Some(player_id)) => match self.leave(player_id) {
                Ok(_) => vec![ServerMessage::PlayerLeft { player_id }],
                Err(e) => {
                    debug!("Ignored leave from {}: {}", player_id, e);
                    Vec::new()
                }
            },
            (message, None) => {
                debug!("Ignored {:?} from a connection that has not joined", message);
                Vec::new()
            }
        }
    }

    fn join_notifications(&self, player_id: PlayerId) -> Vec<ServerMessage> {
        let Some(player) = self.session().get_player(player_id) else {
            return Vec::new();
        };
        vec![
            ServerMessage::JoinAccepted {
                player_id,
                slot: player.slot,
                color: player.color(),
            },
            ServerMessage::PlayerJoined {
                player_id,
                color: player.color(),
            },
        ]
    }

    /// Run one tick and collect the outbound messages. Idle rooms produce nothing;
    /// the tick that ends the game still emits its final snapshot.
    pub fn update(&mut self) -> Vec<ServerMessage> {
        if !self.game_loop.state().running {
            return Vec::new();
        }

        let events = self.game_loop.tick();
        let mut messages = Vec::with_capacity(events.len() + 1);

        let game_over = events
            .iter()
            .any(|e| matches!(e, GameLoopEvent::GameOver { .. }));
        if game_over || self.session().tick % self.snapshot_interval == 0 {
            messages.push(ServerMessage::Snapshot(self.snapshot()));
        }

        for event in events {
            match event {
                GameLoopEvent::LevelAdvanced { level } => {
                    messages.push(ServerMessage::Event(GameEvent::LevelAdvanced { level }));
                }
                GameLoopEvent::GameOver { score, level } => {
                    messages.push(ServerMessage::Event(GameEvent::GameOver { score, level }));
                }
                GameLoopEvent::PlayerDied { player_id } => {
                    info!("Player {} is out of lives in room '{}'", player_id, self.name);
                }
            }
        }

        messages
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_session(self.session())
    }
}

/// Room errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    #[error("Room is full")]
    RoomFull,
    #[error("Player not found")]
    PlayerNotFound,
}
