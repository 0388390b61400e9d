//! Scripted player used by the headless runner and benchmarks
//!
//! Walks under the nearest bouncer and fires whenever it is lined up and the
//! harpoon is free. Produces ordinary [`PlayerIntent`]s, so it drives the engine
//! exactly like a connected client would.

use smallvec::SmallVec;

use crate::game::entities::Bouncer;
use crate::game::game_loop::PlayerIntent;
use crate::game::state::{PlayerId, Session};

/// Horizontal distance at which the autopilot stops walking
const ALIGN_TOLERANCE: f32 = 4.0;

pub type Intents = SmallVec<[PlayerIntent; 3]>;

/// Intents for `player_id` given the current session; empty for dead or unknown players
pub fn decide(session: &Session, player_id: PlayerId) -> Intents {
    let mut intents = Intents::new();
    let Some(player) = session.get_player(player_id) else {
        return intents;
    };
    if !player.alive {
        return intents;
    }

    let centre = player.position.x + player.width / 2.0;
    let Some(target) = nearest_bouncer(&session.bouncers, centre) else {
        intents.push(PlayerIntent::MoveLeft(false));
        intents.push(PlayerIntent::MoveRight(false));
        return intents;
    };

    let offset = target.position.x - centre;
    intents.push(PlayerIntent::MoveLeft(offset < -ALIGN_TOLERANCE));
    intents.push(PlayerIntent::MoveRight(offset > ALIGN_TOLERANCE));

    if offset.abs() < target.radius && !player.has_active_harpoon() {
        intents.push(PlayerIntent::Shoot);
    }
    intents
}

fn nearest_bouncer(bouncers: &[Bouncer], x: f32) -> Option<&Bouncer> {
    bouncers.iter().min_by(|a, b| {
        let da = (a.position.x - x).abs();
        let db = (b.position.x - x).abs();
        da.total_cmp(&db)
    })
}
