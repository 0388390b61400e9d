//! Player pass: timers, walking and harpoon flight

use crate::game::state::Session;

/// Advance every player: timers, walking, owned harpoon. Dead players stay frozen.
pub fn update(session: &mut Session) {
    for player in session.players.iter_mut() {
        player.advance();
    }
}
