//! Pickup lifetime and collection

use tracing::debug;

use crate::game::state::Session;
use crate::game::systems::collision::rect_intersects_rect;

/// Drop expired pickups, age the rest, and apply each one to every living player
/// touching it.
pub fn update(session: &mut Session) {
    session.pickups.retain(|pickup| pickup.active);

    for pickup in session.pickups.iter_mut() {
        pickup.advance();
        if !pickup.active {
            continue;
        }

        // Every overlapping player gets the effect, even after the first one took it
        let rect = Some(pickup.rect());
        for player in session.players.iter_mut() {
            if player.alive && rect_intersects_rect(Some(player.body_rect()), rect) {
                pickup.active = false;
                player.apply_power_up(pickup.kind);
                debug!("Player {} collected {:?}", player.id, pickup.kind);
            }
        }
    }
}
