use serde::{Deserialize, Serialize};

use crate::game::constants::pickup::{HEIGHT, LIFETIME_TICKS, WIDTH};
use crate::game::systems::collision::Rect;
use crate::util::vec2::Vec2;

/// Power-up kinds a pickup can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    /// Harpoon extends 1.5x faster
    BulletSpeed,
    /// Harpoon holds at the ceiling for 180 ticks instead of 15
    FixedRope,
}

impl PowerUpKind {
    /// Even split between the two kinds from a unit sample
    pub fn from_sample(sample: f32) -> Self {
        if sample < 0.5 {
            PowerUpKind::BulletSpeed
        } else {
            PowerUpKind::FixedRope
        }
    }
}

/// A power-up lying on the floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    /// Centre of the pickup box
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: PowerUpKind,
    /// Ticks left before it vanishes
    pub timer: u32,
    pub active: bool,
}

impl Pickup {
    pub fn new(position: Vec2, kind: PowerUpKind) -> Self {
        Self {
            position,
            width: WIDTH,
            height: HEIGHT,
            kind,
            timer: LIFETIME_TICKS,
            active: true,
        }
    }

    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.timer = self.timer.saturating_sub(1);
        if self.timer == 0 {
            self.active = false;
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(
            self.position.x - self.width / 2.0,
            self.position.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }
}
