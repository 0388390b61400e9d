pub mod autopilot;
pub mod constants;
pub mod entities;
pub mod game_loop;
pub mod rng;
pub mod scheduler;
pub mod state;
pub mod systems;
