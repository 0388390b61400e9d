/// World geometry and timing - fixed for every session, not runtime-configurable
pub mod world {
    /// Playfield width in pixels
    pub const WIDTH: f32 = 800.0;
    /// Y coordinate of the floor line (y grows downward)
    pub const FLOOR_Y: f32 = 400.0;
    /// Downward acceleration applied to bouncers each tick
    pub const GRAVITY: f32 = 0.15;
    /// Server tick rate in Hz
    pub const TICK_RATE: u32 = 60;
    /// Tick duration in microseconds (16_666us at 60 Hz)
    pub const TICK_DURATION_US: u64 = 1_000_000 / TICK_RATE as u64;
    /// Maximum players per session
    pub const MAX_PLAYERS: usize = 2;
}

/// Player body and movement
pub mod player {
    pub const WIDTH: f32 = 32.0;
    pub const HEIGHT: f32 = 32.0;
    /// Horizontal walking speed (pixels per tick)
    pub const SPEED: f32 = 3.0;
    pub const STARTING_LIVES: u32 = 3;
    /// Invincibility granted on join (ticks)
    pub const SPAWN_INVINCIBILITY: u32 = 30;
    /// Invincibility granted to everyone when a level is cleared (ticks)
    pub const LEVEL_INVINCIBILITY: u32 = 30;
    /// Damage invincibility before level scaling (ticks)
    pub const HIT_INVINCIBILITY_BASE: u32 = 120;
    /// Damage invincibility lost per level (ticks)
    pub const HIT_INVINCIBILITY_PER_LEVEL: u32 = 10;
    /// Damage invincibility never drops below this (ticks)
    pub const HIT_INVINCIBILITY_MIN: u32 = 30;
    /// Distance of the starting slots from the side walls
    pub const SLOT_MARGIN: f32 = 50.0;

    /// Body top edge; players stand on the floor and never move vertically
    pub const GROUND_Y: f32 = super::world::FLOOR_Y - HEIGHT;

    /// Invincibility granted after losing a life at `level`
    pub fn hit_invincibility(level: u32) -> u32 {
        HIT_INVINCIBILITY_BASE
            .saturating_sub(HIT_INVINCIBILITY_PER_LEVEL.saturating_mul(level))
            .max(HIT_INVINCIBILITY_MIN)
    }
}

/// Harpoon (projectile) constants
pub mod harpoon {
    pub const WIDTH: f32 = 3.0;
    /// Base extension speed (pixels per tick)
    pub const BASE_SPEED: f32 = 7.0;
    /// Ticks the rope stays at the ceiling normally
    pub const HOLD_TICKS: u32 = 15;
    /// Ticks the rope stays at the ceiling with the fixed-rope modifier
    pub const FIXED_ROPE_HOLD_TICKS: u32 = 180;
}

/// Bouncer (enemy ball) constants
pub mod bouncer {
    /// Radius of freshly spawned bouncers
    pub const SPAWN_RADIUS: f32 = 30.0;
    /// Spawn height of a new wave
    pub const SPAWN_Y: f32 = 80.0;
    /// Bouncers smaller than this are destroyed outright instead of splitting
    pub const MIN_SPLIT_RADIUS: f32 = 10.0;
    /// Vertical velocity at construction
    pub const INITIAL_DY: f32 = 0.1;

    pub const BOUNCINESS_BASE: f32 = 6.0;
    pub const BOUNCINESS_PER_RADIUS: f32 = 0.15;
    pub const BOUNCINESS_MAX: f32 = 10.5;

    pub const MIN_BOUNCE_BASE: f32 = 4.0;
    pub const MIN_BOUNCE_PER_RADIUS: f32 = 0.10;
    pub const MIN_BOUNCE_MAX: f32 = 7.0;

    /// Floor restitution is `bounciness * (RESTITUTION_MIN + random * RESTITUTION_SPREAD)`
    pub const RESTITUTION_MIN: f32 = 0.7;
    pub const RESTITUTION_SPREAD: f32 = 0.25;

    /// Horizontal speed floor for spawns and split products
    pub const MIN_SPEED: f32 = 0.6;
    /// Horizontal speed ceiling numerator: cap = SPEED_CAP_RADIUS / radius
    pub const SPEED_CAP_RADIUS: f32 = 30.0;

    /// Split children launch upward at this vertical velocity
    pub const SPLIT_DY: f32 = -4.0;
    pub const SPLIT_SPEED_BASE: f32 = 2.0;
    pub const SPLIT_SPEED_PER_LEVEL: f32 = 0.1;
    pub const SPLIT_SPEED_SCALE: f32 = 0.8;

    /// Score numerator: a kill is worth ceil(SCORE_NUMERATOR / radius)
    pub const SCORE_NUMERATOR: f32 = 150.0;

    /// Floor bounce strength, saturating in radius
    pub fn bounciness(radius: f32) -> f32 {
        (BOUNCINESS_BASE + radius * BOUNCINESS_PER_RADIUS).min(BOUNCINESS_MAX)
    }

    /// Minimum floor bounce speed, saturating in radius
    pub fn min_bounce(radius: f32) -> f32 {
        (MIN_BOUNCE_BASE + radius * MIN_BOUNCE_PER_RADIUS).min(MIN_BOUNCE_MAX)
    }

    /// Score for destroying a bouncer of `radius`
    pub fn kill_score(radius: f32) -> u32 {
        (SCORE_NUMERATOR / radius).ceil() as u32
    }
}

/// Pickup (power-up) constants
pub mod pickup {
    pub const WIDTH: f32 = 10.0;
    pub const HEIGHT: f32 = 10.0;
    /// Lifespan on the floor (ticks, 10s)
    pub const LIFETIME_TICKS: u32 = 600;
    /// Duration of the effect once collected (ticks)
    pub const EFFECT_TICKS: u32 = 600;
    /// Chance that a split drops a pickup
    pub const DROP_CHANCE: f32 = 0.1;
    /// Harpoon speed multiplier of the bullet-speed power-up
    pub const BULLET_SPEED_MULTIPLIER: f32 = 1.5;
    /// Pickups rest this far above the floor
    pub const FLOOR_OFFSET: f32 = 10.0;
}

/// Wave composition
pub mod spawn {
    pub const BASE_COUNT: u32 = 2;
    pub const SPEED_FACTOR_BASE: f32 = 1.5;
    pub const SPEED_FACTOR_PER_LEVEL: f32 = 0.2;

    /// Number of bouncers in the wave for `level`
    pub fn wave_size(level: u32) -> u32 {
        BASE_COUNT + level / 2
    }

    /// Horizontal speed factor for `level`
    pub fn speed_factor(level: u32) -> f32 {
        SPEED_FACTOR_BASE + SPEED_FACTOR_PER_LEVEL * level as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ground_y() {
        assert_eq!(player::GROUND_Y, 368.0);
    }

    #[test]
    fn test_hit_invincibility_shrinks_with_level() {
        assert_eq!(player::hit_invincibility(1), 110);
        assert_eq!(player::hit_invincibility(5), 70);
        assert_eq!(player::hit_invincibility(9), 30);
        assert_eq!(player::hit_invincibility(50), 30);
    }

    #[test]
    fn test_bounce_saturation() {
        assert_eq!(bouncer::bounciness(30.0), 10.5);
        assert_eq!(bouncer::min_bounce(30.0), 7.0);
        assert_eq!(bouncer::bounciness(100.0), bouncer::BOUNCINESS_MAX);
        assert_eq!(bouncer::min_bounce(100.0), bouncer::MIN_BOUNCE_MAX);
        assert!((bouncer::bounciness(15.0) - 8.25).abs() < 1e-5);
        assert!((bouncer::min_bounce(15.0) - 5.5).abs() < 1e-5);
    }

    #[test]
    fn test_kill_score() {
        assert_eq!(bouncer::kill_score(30.0), 5);
        assert_eq!(bouncer::kill_score(15.0), 10);
        assert_eq!(bouncer::kill_score(7.5), 20);
    }

    #[test]
    fn test_wave_size() {
        assert_eq!(spawn::wave_size(1), 2);
        assert_eq!(spawn::wave_size(2), 3);
        assert_eq!(spawn::wave_size(5), 4);
    }

    #[test]
    fn test_tick_duration() {
        assert_eq!(world::TICK_DURATION_US, 16_666);
    }

    mod props {
        use super::super::bouncer;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn bounce_is_monotone_and_capped(a in 0.5f32..200.0, b in 0.5f32..200.0) {
                let (small, large) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(bouncer::bounciness(small) <= bouncer::bounciness(large));
                prop_assert!(bouncer::min_bounce(small) <= bouncer::min_bounce(large));
                prop_assert!(bouncer::bounciness(large) <= bouncer::BOUNCINESS_MAX);
                prop_assert!(bouncer::min_bounce(large) <= bouncer::MIN_BOUNCE_MAX);
            }

            #[test]
            fn smaller_radius_never_scores_less(a in 1.0f32..60.0, b in 1.0f32..60.0) {
                let (small, large) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(bouncer::kill_score(small) >= bouncer::kill_score(large));
            }
        }
    }
}
