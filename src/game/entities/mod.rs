//! Entity models. Each entity owns its physical state and a per-tick `advance()`.

pub mod bouncer;
pub mod harpoon;
pub mod pickup;
pub mod player;

pub use bouncer::Bouncer;
pub use harpoon::{Harpoon, HarpoonPhase};
pub use pickup::{Pickup, PowerUpKind};
pub use player::{ActivePowerUp, InputFlags, Player, PlayerColor, Slot};
