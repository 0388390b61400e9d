//! Room management: the boundary between client connections and the simulation
//!
//! A room owns one session, admits up to two players, routes their input into the
//! engine and turns tick results into outbound messages.

pub mod manager;
pub mod room;
