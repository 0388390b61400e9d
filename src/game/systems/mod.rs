pub mod bouncers;
pub mod collision;
pub mod pickups;
pub mod players;
pub mod spawner;
