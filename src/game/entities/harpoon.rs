//! Harpoon (projectile) lifecycle
//!
//! A harpoon is a vertical rope fired from the player's head. It extends upward until it
//! reaches the ceiling, holds there for a fixed number of ticks, then disappears. Striking
//! a bouncer freezes and retires it immediately.

use serde::{Deserialize, Serialize};

use crate::game::constants::harpoon::{FIXED_ROPE_HOLD_TICKS, HOLD_TICKS, WIDTH};
use crate::game::entities::player::PlayerColor;
use crate::game::systems::collision::Rect;

/// Harpoon state machine: Extending -> Holding -> Inactive (terminal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HarpoonPhase {
    Extending,
    Holding,
    Inactive,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Harpoon {
    /// Rope x (centre line)
    pub x: f32,
    /// Y the rope was launched from (rope bottom)
    pub launch_y: f32,
    /// Current rope tip
    pub y: f32,
    pub color: PlayerColor,
    pub width: f32,
    pub speed: f32,
    pub phase: HarpoonPhase,
    pub hold_timer: u32,
    /// Fixed at creation from the owner's fixed-rope modifier
    pub hold_duration: u32,
    pub hit_something: bool,
}

impl Harpoon {
    pub fn new(x: f32, launch_y: f32, color: PlayerColor, speed: f32, fixed_rope: bool) -> Self {
        Self {
            x,
            launch_y,
            y: launch_y,
            color,
            width: WIDTH,
            speed,
            phase: HarpoonPhase::Extending,
            hold_timer: 0,
            hold_duration: if fixed_rope { FIXED_ROPE_HOLD_TICKS } else { HOLD_TICKS },
            hit_something: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase != HarpoonPhase::Inactive
    }

    pub fn advance(&mut self) {
        match self.phase {
            HarpoonPhase::Inactive => {}
            HarpoonPhase::Extending if !self.hit_something => {
                self.y -= self.speed;
                if self.y <= 0.0 {
                    self.y = 0.0;
                    self.phase = HarpoonPhase::Holding;
                    self.hold_timer = self.hold_duration;
                }
            }
            HarpoonPhase::Holding if self.hold_timer > 0 && !self.hit_something => {
                self.hold_timer -= 1;
            }
            _ => self.phase = HarpoonPhase::Inactive,
        }
    }

    /// Freeze in place after striking a bouncer and retire
    pub fn strike(&mut self) {
        self.hit_something = true;
        self.phase = HarpoonPhase::Inactive;
    }

    pub fn deactivate(&mut self) {
        self.phase = HarpoonPhase::Inactive;
    }

    /// Thin box spanning the rope from its tip down to the launch point
    pub fn rope_rect(&self) -> Rect {
        Rect::new(
            self.x - self.width / 2.0,
            self.y,
            self.width,
            self.launch_y - self.y,
        )
    }
}
