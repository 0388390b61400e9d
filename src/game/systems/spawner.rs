//! Wave spawner: composition and launch kinematics of a level's bouncers

use crate::game::constants::{bouncer, spawn, world};
use crate::game::entities::Bouncer;
use crate::util::vec2::Vec2;

/// Build the wave for `level`: evenly spaced full-size bouncers, alternating direction
pub fn spawn_wave(level: u32) -> Vec<Bouncer> {
    let count = spawn::wave_size(level);
    let spacing = world::WIDTH / (count + 1) as f32;

    (0..count)
        .map(|i| {
            let x = spacing * (i + 1) as f32;
            let direction = if i % 2 == 0 { 1.0 } else { -1.0 };
            Bouncer::launched(
                Vec2::new(x, bouncer::SPAWN_Y),
                bouncer::SPAWN_RADIUS,
                direction,
                level,
            )
        })
        .collect()
}
