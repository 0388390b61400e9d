//! Player model: walking, harpoon ownership, power-up timers

use serde::{Deserialize, Serialize};

use crate::game::constants::{harpoon, pickup, player, world};
use crate::game::entities::harpoon::Harpoon;
use crate::game::entities::pickup::PowerUpKind;
use crate::game::state::PlayerId;
use crate::game::systems::collision::Rect;
use crate::util::vec2::Vec2;

/// Player colour, also tags the harpoon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Blue,
}

/// Starting slot; a session has exactly two
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Slot {
    Left,
    Right,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Left, Slot::Right];

    pub fn color(&self) -> PlayerColor {
        match self {
            Slot::Left => PlayerColor::Red,
            Slot::Right => PlayerColor::Blue,
        }
    }

    pub fn spawn_x(&self) -> f32 {
        match self {
            Slot::Left => player::SLOT_MARGIN,
            Slot::Right => world::WIDTH - player::SLOT_MARGIN - player::WIDTH,
        }
    }
}

/// Power-up currently applied to a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining: u32,
}

/// Held movement keys (last write wins)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputFlags {
    pub left: bool,
    pub right: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub slot: Slot,
    /// Top-left of the body; y stays at ground level
    pub position: Vec2,
    pub vx: f32,
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub lives: u32,
    /// Remaining invincibility ticks
    pub invincible: u32,
    pub alive: bool,
    /// Owned harpoon; only present while it is active
    pub harpoon: Option<Harpoon>,
    pub power_up: Option<ActivePowerUp>,
    pub base_harpoon_speed: f32,
    pub harpoon_speed: f32,
    pub fixed_rope: bool,
    pub inputs: InputFlags,
}

impl Player {
    pub fn new(id: PlayerId, slot: Slot) -> Self {
        Self {
            id,
            slot,
            position: Vec2::new(slot.spawn_x(), player::GROUND_Y),
            vx: 0.0,
            speed: player::SPEED,
            width: player::WIDTH,
            height: player::HEIGHT,
            lives: player::STARTING_LIVES,
            invincible: player::SPAWN_INVINCIBILITY,
            alive: true,
            harpoon: None,
            power_up: None,
            base_harpoon_speed: harpoon::BASE_SPEED,
            harpoon_speed: harpoon::BASE_SPEED,
            fixed_rope: false,
            inputs: InputFlags::default(),
        }
    }

    pub fn color(&self) -> PlayerColor {
        self.slot.color()
    }

    pub fn body_rect(&self) -> Rect {
        Rect::new(self.position.x, self.position.y, self.width, self.height)
    }

    /// Alive and not protected by invincibility
    pub fn is_vulnerable(&self) -> bool {
        self.alive && self.invincible == 0
    }

    pub fn has_active_harpoon(&self) -> bool {
        self.harpoon.as_ref().is_some_and(Harpoon::is_active)
    }

    /// Per-tick update: timers, walking, harpoon
    pub fn advance(&mut self) {
        if !self.alive {
            self.release_harpoon();
            return;
        }

        self.invincible = self.invincible.saturating_sub(1);

        if let Some(active) = self.power_up.as_mut() {
            active.remaining = active.remaining.saturating_sub(1);
            if active.remaining == 0 {
                self.revert_power_up();
            }
        }

        // Left wins when both keys are held
        self.vx = if self.inputs.left {
            -self.speed
        } else if self.inputs.right {
            self.speed
        } else {
            0.0
        };
        self.position.x =
            (self.position.x + self.vx).clamp(0.0, world::WIDTH - self.width);

        if let Some(harpoon) = self.harpoon.as_mut() {
            harpoon.advance();
            if !harpoon.is_active() {
                self.harpoon = None;
            }
        }
    }

    /// Fire a harpoon. No-op when dead or while one is already out.
    pub fn shoot(&mut self) -> bool {
        if !self.alive || self.has_active_harpoon() {
            return false;
        }
        self.harpoon = Some(Harpoon::new(
            self.position.x + self.width / 2.0,
            self.position.y,
            self.color(),
            self.harpoon_speed,
            self.fixed_rope,
        ));
        true
    }

    /// Deactivate and drop the owned harpoon, if any
    pub fn release_harpoon(&mut self) {
        if let Some(mut harpoon) = self.harpoon.take() {
            harpoon.deactivate();
        }
    }

    /// Mark the owned harpoon as having struck a target and drop it
    pub fn retire_harpoon_on_hit(&mut self) {
        if let Some(mut harpoon) = self.harpoon.take() {
            harpoon.strike();
        }
    }

    /// Replace any active power-up with `kind` and restart the effect timer
    pub fn apply_power_up(&mut self, kind: PowerUpKind) {
        self.revert_power_up();
        match kind {
            PowerUpKind::BulletSpeed => {
                self.harpoon_speed = self.base_harpoon_speed * pickup::BULLET_SPEED_MULTIPLIER;
            }
            PowerUpKind::FixedRope => self.fixed_rope = true,
        }
        self.power_up = Some(ActivePowerUp {
            kind,
            remaining: pickup::EFFECT_TICKS,
        });
    }

    /// Undo the active power-up's effect and clear the slot
    pub fn revert_power_up(&mut self) {
        if let Some(active) = self.power_up.take() {
            match active.kind {
                PowerUpKind::BulletSpeed => self.harpoon_speed = self.base_harpoon_speed,
                PowerUpKind::FixedRope => self.fixed_rope = false,
            }
        }
    }

    /// Lose a life to a bouncer. Returns true if this killed the player.
    pub fn take_hit(&mut self, level: u32) -> bool {
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.alive = false;
            true
        } else {
            self.invincible = player::hit_invincibility(level);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn test_player(slot: Slot) -> Player {
        let mut p = Player::new(Uuid::new_v4(), slot);
        p.invincible = 0;
        p
    }

    #[test]
    fn test_player_new() {
        let p = Player::new(Uuid::new_v4(), Slot::Left);
        assert_eq!(p.position, Vec2::new(50.0, 368.0));
        assert_eq!(p.lives, 3);
        assert_eq!(p.invincible, 30);
        assert_eq!(p.color(), PlayerColor::Red);
        assert!(p.alive);
        assert!(p.harpoon.is_none());
    }

    #[test]
    fn test_right_slot() {
        let p = Player::new(Uuid::new_v4(), Slot::Right);
        assert_eq!(p.position.x, 718.0);
        assert_eq!(p.color(), PlayerColor::Blue);
    }

    #[test]
    fn test_left_takes_precedence() {
        let mut p = test_player(Slot::Left);
        p.inputs = InputFlags { left: true, right: true };
        p.advance();
        assert_eq!(p.vx, -3.0);
        assert_eq!(p.position.x, 47.0);
    }

    #[test]
    fn test_clamped_at_left_wall() {
        let mut p = test_player(Slot::Left);
        p.inputs.left = true;
        p.inputs.right = true;
        for _ in 0..40 {
            p.advance();
        }
        assert_eq!(p.position.x, 0.0);
    }

    #[test]
    fn test_clamped_at_right_wall() {
        let mut p = test_player(Slot::Right);
        p.inputs.right = true;
        for _ in 0..40 {
            p.advance();
        }
        assert_eq!(p.position.x, 768.0);
        assert_eq!(p.position.y, 368.0);
    }

    #[test]
    fn test_invincibility_counts_down() {
        let mut p = Player::new(Uuid::new_v4(), Slot::Left);
        p.advance();
        assert_eq!(p.invincible, 29);
    }

    #[test]
    fn test_single_harpoon() {
        let mut p = test_player(Slot::Left);
        assert!(p.shoot());
        assert!(!p.shoot());
        let h = p.harpoon.as_ref().unwrap();
        assert_eq!(h.x, 66.0);
        assert_eq!(h.launch_y, 368.0);
        assert_eq!(h.color, PlayerColor::Red);
    }

    #[test]
    fn test_dead_player_cannot_shoot() {
        let mut p = test_player(Slot::Left);
        p.alive = false;
        assert!(!p.shoot());
    }

    #[test]
    fn test_dead_player_frozen_and_released() {
        let mut p = test_player(Slot::Left);
        p.shoot();
        p.alive = false;
        p.inputs.right = true;
        p.advance();
        assert!(p.harpoon.is_none());
        assert_eq!(p.position.x, 50.0);
    }

    #[test]
    fn test_harpoon_released_when_inactive() {
        let mut p = test_player(Slot::Left);
        p.shoot();
        let mut ticks = 0;
        while p.harpoon.is_some() {
            p.advance();
            ticks += 1;
        }
        assert_eq!(ticks, 53 + 15 + 1);
        assert!(p.shoot());
    }

    #[test]
    fn test_bullet_speed_reverts_after_effect() {
        let mut p = test_player(Slot::Left);
        p.apply_power_up(PowerUpKind::BulletSpeed);
        assert_eq!(p.harpoon_speed, 10.5);
        for _ in 0..599 {
            p.advance();
        }
        assert_eq!(p.harpoon_speed, 10.5);
        p.advance();
        assert_eq!(p.harpoon_speed, p.base_harpoon_speed);
        assert!(p.power_up.is_none());
    }

    #[test]
    fn test_power_up_replaces_previous() {
        let mut p = test_player(Slot::Left);
        p.apply_power_up(PowerUpKind::BulletSpeed);
        p.apply_power_up(PowerUpKind::FixedRope);
        assert_eq!(p.harpoon_speed, p.base_harpoon_speed);
        assert!(p.fixed_rope);
        assert_eq!(p.power_up.unwrap().kind, PowerUpKind::FixedRope);
        assert_eq!(p.power_up.unwrap().remaining, 600);
    }

    #[test]
    fn test_hold_duration_not_reevaluated() {
        let mut p = test_player(Slot::Left);
        p.apply_power_up(PowerUpKind::FixedRope);
        p.shoot();
        p.revert_power_up();
        assert!(!p.fixed_rope);
        assert_eq!(p.harpoon.as_ref().unwrap().hold_duration, 180);
    }

    #[test]
    fn test_take_hit() {
        let mut p = test_player(Slot::Left);
        assert!(!p.take_hit(1));
        assert_eq!(p.lives, 2);
        assert_eq!(p.invincible, 110);
        assert!(!p.is_vulnerable());

        p.invincible = 0;
        assert!(!p.take_hit(20));
        assert_eq!(p.invincible, 30);

        assert!(p.take_hit(1));
        assert!(!p.alive);
        assert_eq!(p.lives, 0);
    }
}
