#[cfg(feature = "lobby")]
pub mod game_session;
pub mod protocol;
