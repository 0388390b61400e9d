//! Bouncer pass: physics, harpoon strikes, splitting and body damage
//!
//! Bouncers are scanned in reverse index order. Struck bouncers and split products are
//! queued during the scan and applied once it completes, so children never take part in
//! the pass that created them.

use smallvec::SmallVec;
use tracing::debug;

use crate::game::constants::{pickup, world};
use crate::game::entities::{Bouncer, Harpoon, Pickup, PowerUpKind};
use crate::game::rng::RandomSource;
use crate::game::state::{PlayerId, Session};
use crate::game::systems::collision::circle_intersects_rect;
use crate::util::vec2::Vec2;

/// Run the bouncer pass. Returns the players killed by bouncers this tick.
pub fn update(session: &mut Session, rng: &mut dyn RandomSource) -> Vec<PlayerId> {
    let level = session.level;
    let mut destroyed: SmallVec<[usize; 8]> = SmallVec::new();
    let mut spawned: SmallVec<[Bouncer; 8]> = SmallVec::new();
    let mut deaths = Vec::new();

    for index in (0..session.bouncers.len()).rev() {
        session.bouncers[index].advance(rng);
        let bouncer = &session.bouncers[index];
        let circle = Some(bouncer.circle());

        // First roster entry whose rope overlaps wins the kill
        let striker = session.players.iter().position(|player| {
            let rope = player
                .harpoon
                .as_ref()
                .filter(|harpoon| harpoon.is_active())
                .map(Harpoon::rope_rect);
            circle_intersects_rect(circle, rope)
        });

        if let Some(striker) = striker {
            session.score += bouncer.kill_score();

            if let Some(children) = bouncer.split(level) {
                spawned.extend(children);

                if rng.next_unit() < pickup::DROP_CHANCE {
                    let kind = PowerUpKind::from_sample(rng.next_unit());
                    let position =
                        Vec2::new(bouncer.position.x, world::FLOOR_Y - pickup::FLOOR_OFFSET);
                    session.pickups.push(Pickup::new(position, kind));
                    debug!("Dropped {:?} pickup at x={:.1}", kind, position.x);
                }
            }

            debug!(
                "Player {} popped bouncer r={} (score {})",
                session.players[striker].id, bouncer.radius, session.score
            );
            destroyed.push(index);
            session.players[striker].retire_harpoon_on_hit();
            continue;
        }

        // Kill beats damage: body checks only run for bouncers that were not struck
        for player in session.players.iter_mut() {
            if !player.is_vulnerable() {
                continue;
            }
            if circle_intersects_rect(circle, Some(player.body_rect())) && player.take_hit(level) {
                debug!("Player {} lost their last life", player.id);
                deaths.push(player.id);
            }
        }
    }

    // Indices were collected in descending order, so removal keeps the rest valid
    for index in destroyed {
        session.bouncers.remove(index);
    }
    session.bouncers.extend(spawned);

    deaths
}
