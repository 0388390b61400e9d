//! Session state: the single root value the engine mutates each tick
//!
//! Contains the player roster, bouncers, pickups and progress counters.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::game::constants::world;
use crate::game::entities::{Bouncer, Pickup, Player, Slot};

/// Opaque player identifier, issued by the session controller
pub type PlayerId = Uuid;

/// Complete session state for one room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Ticks simulated since the session started
    pub tick: u64,
    /// Roster in join order; this order decides harpoon-hit ties
    pub players: Vec<Player>,
    pub bouncers: Vec<Bouncer>,
    pub pickups: Vec<Pickup>,
    pub score: u32,
    pub level: u32,
    pub running: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            tick: 0,
            players: Vec::with_capacity(world::MAX_PLAYERS),
            bouncers: Vec::new(),
            pickups: Vec::new(),
            score: 0,
            level: 1,
            running: false,
        }
    }
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= world::MAX_PLAYERS
    }

    /// First starting slot no current player occupies
    pub fn free_slot(&self) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| self.players.iter().all(|p| p.slot != *slot))
    }

    pub fn alive_count(&self) -> usize {
        self.players.iter().filter(|p| p.alive).count()
    }

    /// True once every player in a non-empty roster is dead
    pub fn all_dead(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(|p| !p.alive)
    }

    pub fn add_player(&mut self, player: Player) {
        self.players.push(player);
    }

    pub fn remove_player(&mut self, id: PlayerId) -> Option<Player> {
        let index = self.players.iter().position(|p| p.id == id)?;
        Some(self.players.remove(index))
    }

    /// Back to an empty, stopped session
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
