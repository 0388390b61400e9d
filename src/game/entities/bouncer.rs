//! Bouncer (enemy ball) physics and splitting

use serde::{Deserialize, Serialize};

use crate::game::constants::bouncer::{
    self as tuning, INITIAL_DY, MIN_SPEED, MIN_SPLIT_RADIUS, RESTITUTION_MIN,
    RESTITUTION_SPREAD, SPEED_CAP_RADIUS, SPLIT_DY, SPLIT_SPEED_BASE, SPLIT_SPEED_PER_LEVEL,
    SPLIT_SPEED_SCALE,
};
use crate::game::constants::{spawn, world};
use crate::game::rng::RandomSource;
use crate::game::systems::collision::Circle;
use crate::util::vec2::Vec2;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bouncer {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
    /// Floor bounce strength, derived from radius once at construction
    pub bounciness: f32,
    /// Floor bounce speed never falls below this
    pub min_bounce: f32,
}

impl Bouncer {
    /// Bouncer with an explicit horizontal velocity
    pub fn new(position: Vec2, radius: f32, dx: f32) -> Self {
        Self {
            position,
            velocity: Vec2::new(dx, INITIAL_DY),
            radius,
            bounciness: tuning::bounciness(radius),
            min_bounce: tuning::min_bounce(radius),
        }
    }

    /// Bouncer launched with the level's speed factor; `direction` only contributes its sign
    pub fn launched(position: Vec2, radius: f32, direction: f32, level: u32) -> Self {
        let dx = launch_speed(level, radius).copysign(direction);
        Self::new(position, radius, dx)
    }

    pub fn circle(&self) -> Circle {
        Circle::new(self.position, self.radius)
    }

    pub fn can_split(&self) -> bool {
        self.radius >= MIN_SPLIT_RADIUS
    }

    pub fn kill_score(&self) -> u32 {
        tuning::kill_score(self.radius)
    }

    /// Gravity, integration, then ceiling, wall and floor response
    pub fn advance(&mut self, rng: &mut dyn RandomSource) {
        self.velocity.y += world::GRAVITY;
        self.position += self.velocity;

        if self.position.y - self.radius < 0.0 {
            self.position.y = self.radius;
            self.velocity.y = 0.0;
        }

        if self.position.x - self.radius < 0.0 || self.position.x + self.radius > world::WIDTH {
            self.velocity.x = -self.velocity.x;
            self.position.x = self
                .position
                .x
                .max(self.radius)
                .min(world::WIDTH - self.radius);
        }

        if self.position.y + self.radius >= world::FLOOR_Y {
            self.position.y = world::FLOOR_Y - self.radius;
            let restitution = RESTITUTION_MIN + rng.next_unit() * RESTITUTION_SPREAD;
            self.velocity.y = -self.bounciness * restitution;
            if self.velocity.y.abs() < self.min_bounce {
                self.velocity.y = -self.min_bounce;
            }
        }
    }

    /// Two half-size children flying apart and upward, or None if too small to split
    pub fn split(&self, level: u32) -> Option<[Bouncer; 2]> {
        if !self.can_split() {
            return None;
        }
        let speed = split_speed(level, self.velocity.x);
        let radius = self.radius / 2.0;
        let mut left = Bouncer::new(self.position, radius, -speed);
        let mut right = Bouncer::new(self.position, radius, speed);
        left.velocity.y = SPLIT_DY;
        right.velocity.y = SPLIT_DY;
        Some([left, right])
    }
}

/// Horizontal launch speed: level speed factor capped at 30/radius, floored at 0.6
pub fn launch_speed(level: u32, radius: f32) -> f32 {
    spawn::speed_factor(level)
        .min(SPEED_CAP_RADIUS / radius)
        .max(MIN_SPEED)
}

/// Horizontal speed of split children
pub fn split_speed(level: u32, parent_dx: f32) -> f32 {
    let cap = SPLIT_SPEED_BASE + SPLIT_SPEED_PER_LEVEL * level as f32;
    cap.min(parent_dx.abs()).max(MIN_SPEED) * SPLIT_SPEED_SCALE
}
