//! Split Shot Server Library
//!
//! Authoritative simulation for a two-player cooperative harpoon game: players
//! shoot bouncing balls that split in half until they are small enough to pop.
//!
//! # Features
//!
//! - `lobby` - Rooms, room manager and the async tick driver (enabled by default)

pub mod config;
pub mod game;
pub mod net;
pub mod util;

#[cfg(feature = "lobby")]
pub mod lobby;
