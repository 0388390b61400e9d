use std::collections::HashMap;

use tracing::info;
use uuid::Uuid;

use crate::config::ServerConfig;
use crate::game::state::PlayerId;
use crate::lobby::room::{GameRoom, RoomError, RoomState};
use crate::net::protocol::ServerMessage;

/// Independent rooms, each running its own session
pub struct LobbyManager {
    rooms: HashMap<Uuid, GameRoom>,
    player_rooms: HashMap<PlayerId, Uuid>,
    max_rooms: usize,
    rng_seed: Option<u64>,
    snapshot_interval: u64,
    rooms_created: u64,
}

impl LobbyManager {
    pub fn new(max_rooms: usize) -> Self {
        Self {
            rooms: HashMap::new(),
            player_rooms: HashMap::new(),
            max_rooms,
            rng_seed: None,
            snapshot_interval: 1,
            rooms_created: 0,
        }
    }

    pub fn from_config(config: &ServerConfig) -> Self {
        Self {
            rng_seed: config.rng_seed,
            snapshot_interval: config.snapshot_interval,
            ..Self::new(config.max_rooms)
        }
    }

    /// Create a new room
    pub fn create_room(&mut self, name: String) -> Result<Uuid, ManagerError> {
        if self.rooms.len() >= self.max_rooms {
            return Err(ManagerError::TooManyRooms);
        }

        // Rooms get distinct but reproducible streams under a configured seed
        let seed = self.rng_seed.map(|s| s.wrapping_add(self.rooms_created));
        self.rooms_created += 1;

        let room = GameRoom::with_seed(name, seed).with_snapshot_interval(self.snapshot_interval);
        let id = room.id();
        info!("Created room '{}' ({})", room.name, id);
        self.rooms.insert(id, room);

        Ok(id)
    }

    /// Room with a free slot whose game is not over, or a new one
    pub fn find_or_create_room(&mut self) -> Result<Uuid, ManagerError> {
        let open = self
            .rooms
            .iter()
            .find(|(_, room)| !room.is_full() && room.state() != RoomState::Ended)
            .map(|(id, _)| *id);
        if let Some(id) = open {
            return Ok(id);
        }

        self.create_room(format!("Game {}", self.rooms_created + 1))
    }

    pub fn get_room(&self, room_id: Uuid) -> Option<&GameRoom> {
        self.rooms.get(&room_id)
    }

    pub fn get_room_mut(&mut self, room_id: Uuid) -> Option<&mut GameRoom> {
        self.rooms.get_mut(&room_id)
    }

    /// Remove a room and forget its players
    pub fn remove_room(&mut self, room_id: Uuid) -> Option<GameRoom> {
        let room = self.rooms.remove(&room_id)?;
        for player_id in room.player_ids() {
            self.player_rooms.remove(&player_id);
        }
        Some(room)
    }

    /// Join a specific room
    pub fn join_room(&mut self, room_id: Uuid) -> Result<PlayerId, ManagerError> {
        let room = self
            .rooms
            .get_mut(&room_id)
            .ok_or(ManagerError::RoomNotFound)?;

        let player_id = room.join()?;
        self.player_rooms.insert(player_id, room_id);
        Ok(player_id)
    }

    /// Join any open room, creating one if needed
    pub fn quick_join(&mut self) -> Result<(Uuid, PlayerId), ManagerError> {
        let room_id = self.find_or_create_room()?;
        let player_id = self.join_room(room_id)?;
        Ok((room_id, player_id))
    }

    /// Seat `count` players together in one room, creating it if needed
    pub fn seat_together(&mut self, count: usize) -> Result<(Uuid, Vec<PlayerId>), ManagerError> {
        let room_id = self.find_or_create_room()?;
        let mut seated = Vec::with_capacity(count);
        for _ in 0..count {
            seated.push(self.join_room(room_id)?);
        }
        Ok((room_id, seated))
    }

    /// Leave the player's room; empty rooms are closed
    pub fn leave_room(&mut self, player_id: PlayerId) -> Result<(), ManagerError> {
        let room_id = self
            .player_rooms
            .remove(&player_id)
            .ok_or(RoomError::PlayerNotFound)?;

        if let Some(room) = self.rooms.get_mut(&room_id) {
            room.leave(player_id)?;
            if room.is_empty() {
                self.rooms.remove(&room_id);
                info!("Closed empty room {}", room_id);
            }
        }

        Ok(())
    }

    pub fn get_player_room(&self, player_id: PlayerId) -> Option<Uuid> {
        self.player_rooms.get(&player_id).copied()
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn total_player_count(&self) -> usize {
        self.player_rooms.len()
    }

    /// Room listing for a room browser
    pub fn list_rooms(&self) -> Vec<RoomInfo> {
        self.rooms
            .values()
            .map(|room| RoomInfo {
                id: room.id(),
                name: room.name.clone(),
                player_count: room.player_count(),
                state: room.state(),
                level: room.session().level,
                score: room.session().score,
            })
            .collect()
    }

    /// Tick every room; returns each room's outbound messages
    pub fn update_all(&mut self) -> Vec<(Uuid, ServerMessage)> {
        let mut outbound = Vec::new();
        for (id, room) in self.rooms.iter_mut() {
            outbound.extend(room.update().into_iter().map(|m| (*id, m)));
        }
        outbound
    }
}

impl Default for LobbyManager {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Room information for listing
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub id: Uuid,
    pub name: String,
    pub player_count: usize,
    pub state: RoomState,
    pub level: u32,
    pub score: u32,
}

/// Manager errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagerError {
    #[error("Too many rooms")]
    TooManyRooms,
    #[error("Room not found")]
    RoomNotFound,
    #[error("Room error: {0}")]
    Room(#[from] RoomError),
}
