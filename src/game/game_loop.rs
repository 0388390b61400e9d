//! Simulation engine: one fixed-order tick over a [`Session`]
//!
//! Order per tick: players, pickups, bouncers, level transition, game-over check.
//! The engine performs no I/O; it mutates the session it owns and reports what
//! happened as [`GameLoopEvent`]s.

use tracing::{debug, info};

use crate::game::constants::player::LEVEL_INVINCIBILITY;
use crate::game::entities::{Player, Slot};
use crate::game::rng::{self, RandomSource};
use crate::game::state::{PlayerId, Session};
use crate::game::systems::{bouncers, pickups, players, spawner};

/// Notable outcomes of a tick
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameLoopEvent {
    /// A player lost their last life
    PlayerDied { player_id: PlayerId },
    /// The wave was cleared and a new one spawned
    LevelAdvanced { level: u32 },
    /// Every player is dead; the session stopped
    GameOver { score: u32, level: u32 },
}

/// Intent sent by a client, applied between ticks (last write wins per flag)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerIntent {
    MoveLeft(bool),
    MoveRight(bool),
    Shoot,
}

pub struct GameLoop {
    state: Session,
    rng: Box<dyn RandomSource>,
}

impl GameLoop {
    pub fn new(rng: Box<dyn RandomSource>) -> Self {
        Self {
            state: Session::new(),
            rng,
        }
    }

    /// Seeded RNG when `seed` is set, thread RNG otherwise
    pub fn with_seed(seed: Option<u64>) -> Self {
        Self::new(rng::from_seed(seed))
    }

    pub fn state(&self) -> &Session {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut Session {
        &mut self.state
    }

    /// Register a player in the first free slot. The first joiner starts the session
    /// and spawns the opening wave. Returns None when both slots are taken.
    pub fn join(&mut self, id: PlayerId) -> Option<Slot> {
        let slot = self.state.free_slot()?;
        let was_empty = self.state.players.is_empty();
        self.state.add_player(Player::new(id, slot));

        if was_empty {
            self.state.running = true;
            self.state.bouncers = spawner::spawn_wave(self.state.level);
            info!("Session started at level {}", self.state.level);
        }
        Some(slot)
    }

    /// Apply a client intent. Returns false for unknown players.
    pub fn apply_intent(&mut self, id: PlayerId, intent: PlayerIntent) -> bool {
        let Some(player) = self.state.get_player_mut(id) else {
            return false;
        };
        match intent {
            PlayerIntent::MoveLeft(held) => player.inputs.left = held,
            PlayerIntent::MoveRight(held) => player.inputs.right = held,
            PlayerIntent::Shoot => {
                if !player.shoot() {
                    debug!("Ignored shoot from {}", id);
                }
            }
        }
        true
    }

    /// Remove a player; the last one out resets the session
    pub fn leave(&mut self, id: PlayerId) -> Option<Player> {
        let player = self.state.remove_player(id)?;
        if self.state.players.is_empty() {
            self.state.reset();
            info!("Session emptied and reset");
        }
        Some(player)
    }

    /// Run one simulation tick. No-op while the session is not running.
    pub fn tick(&mut self) -> Vec<GameLoopEvent> {
        if !self.state.running {
            return Vec::new();
        }

        let mut events = Vec::new();
        self.state.tick += 1;

        players::update(&mut self.state);
        pickups::update(&mut self.state);
        let deaths = bouncers::update(&mut self.state, self.rng.as_mut());
        events.extend(
            deaths
                .into_iter()
                .map(|player_id| GameLoopEvent::PlayerDied { player_id }),
        );

        if self.state.bouncers.is_empty() {
            self.advance_level();
            events.push(GameLoopEvent::LevelAdvanced {
                level: self.state.level,
            });
        }

        if self.state.all_dead() {
            self.state.running = false;
            info!(
                "Game over at level {} with score {}",
                self.state.level, self.state.score
            );
            events.push(GameLoopEvent::GameOver {
                score: self.state.score,
                level: self.state.level,
            });
        }

        events
    }

    fn advance_level(&mut self) {
        self.state.level += 1;
        self.state.bouncers = spawner::spawn_wave(self.state.level);
        for player in self.state.players.iter_mut() {
            player.invincible = LEVEL_INVINCIBILITY;
        }
        info!("Advanced to level {}", self.state.level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entities::{Bouncer, Pickup, PowerUpKind};
    use crate::game::rng::ScriptedRandom;
    use crate::util::vec2::Vec2;
    use uuid::Uuid;

    fn scripted_loop() -> GameLoop {
        GameLoop::new(Box::new(ScriptedRandom::constant(0.5)))
    }

    fn loop_with_players(count: usize) -> (GameLoop, Vec<PlayerId>) {
        let mut game = scripted_loop();
        let ids: Vec<PlayerId> = (0..count).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            game.join(*id).unwrap();
        }
        (game, ids)
    }

    fn count_level_ups(events: &[GameLoopEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, GameLoopEvent::LevelAdvanced { .. }))
            .count()
    }

    #[test]
    fn test_not_running_is_noop() {
        let mut game = scripted_loop();
        assert!(game.tick().is_empty());
        assert_eq!(game.state().tick, 0);
    }

    #[test]
    fn test_first_join_starts_session() {
        let (game, ids) = loop_with_players(1);
        let state = game.state();
        assert!(state.running);
        assert_eq!(state.bouncers.len(), 2);
        assert_eq!(state.get_player(ids[0]).unwrap().slot, Slot::Left);
    }

    #[test]
    fn test_second_join_takes_right_slot() {
        let (mut game, ids) = loop_with_players(2);
        let second = game.state().get_player(ids[1]).unwrap();
        assert_eq!(second.slot, Slot::Right);
        assert_eq!(second.position.x, 718.0);
        // Second join does not respawn the wave
        assert_eq!(game.state().bouncers.len(), 2);
        assert!(game.join(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_last_leave_resets() {
        let (mut game, ids) = loop_with_players(2);
        game.state_mut().score = 40;

        game.leave(ids[0]);
        assert!(game.state().running);
        assert_eq!(game.state().score, 40);

        game.leave(ids[1]);
        let state = game.state();
        assert!(!state.running);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert!(state.bouncers.is_empty());
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_unknown_player_intent_ignored() {
        let (mut game, _) = loop_with_players(1);
        assert!(!game.apply_intent(Uuid::new_v4(), PlayerIntent::Shoot));
    }

    #[test]
    fn test_movement_intents() {
        let (mut game, ids) = loop_with_players(1);
        game.apply_intent(ids[0], PlayerIntent::MoveLeft(true));
        game.apply_intent(ids[0], PlayerIntent::MoveRight(true));
        game.state_mut().bouncers.clear();
        game.state_mut().bouncers.push(Bouncer::new(Vec2::new(600.0, 80.0), 30.0, 0.0));

        game.tick();
        let player = game.state().get_player(ids[0]).unwrap();
        assert_eq!(player.position.x, 47.0);

        game.apply_intent(ids[0], PlayerIntent::MoveLeft(false));
        game.tick();
        let player = game.state().get_player(ids[0]).unwrap();
        assert_eq!(player.position.x, 50.0);
    }

    #[test]
    fn test_shoot_while_harpoon_out_is_noop() {
        let (mut game, ids) = loop_with_players(1);
        game.apply_intent(ids[0], PlayerIntent::Shoot);
        game.tick();
        let y = game.state().get_player(ids[0]).unwrap().harpoon.as_ref().unwrap().y;

        game.apply_intent(ids[0], PlayerIntent::Shoot);
        let harpoon = game.state().get_player(ids[0]).unwrap().harpoon.as_ref().unwrap();
        assert_eq!(harpoon.y, y);
    }

    #[test]
    fn test_level_clear_spawns_one_wave() {
        let (mut game, ids) = loop_with_players(1);
        {
            let state = game.state_mut();
            state.bouncers.clear();
            state.bouncers.push(Bouncer::new(Vec2::new(66.0, 355.0), 7.5, 0.0));
        }
        game.apply_intent(ids[0], PlayerIntent::Shoot);

        let events = game.tick();

        assert_eq!(count_level_ups(&events), 1);
        assert!(events.contains(&GameLoopEvent::LevelAdvanced { level: 2 }));
        let state = game.state();
        assert_eq!(state.level, 2);
        assert_eq!(state.score, 20);
        assert_eq!(state.bouncers.len(), 3);
        assert!(state.bouncers.iter().all(|b| b.radius == 30.0 && b.position.y == 80.0));
        assert_eq!(state.players[0].invincible, 30);

        // The fresh wave does not immediately trigger another transition
        let events = game.tick();
        assert_eq!(count_level_ups(&events), 0);
    }

    #[test]
    fn test_split_products_survive_the_tick() {
        let (mut game, ids) = loop_with_players(1);
        {
            let state = game.state_mut();
            state.bouncers.clear();
            state.bouncers.push(Bouncer::new(Vec2::new(66.0, 335.0), 30.0, 0.0));
        }
        game.apply_intent(ids[0], PlayerIntent::Shoot);

        let events = game.tick();

        assert!(events.is_empty());
        let state = game.state();
        assert_eq!(state.bouncers.len(), 2);
        assert!(state.bouncers.iter().all(|b| b.velocity.y == -4.0));
    }

    #[test]
    fn test_both_players_die_same_tick() {
        let (mut game, _) = loop_with_players(2);
        {
            let state = game.state_mut();
            state.score = 35;
            for player in state.players.iter_mut() {
                player.invincible = 0;
                player.lives = 1;
            }
            state.bouncers.clear();
            state.bouncers.push(Bouncer::new(Vec2::new(66.0, 360.0), 30.0, 0.0));
            state.bouncers.push(Bouncer::new(Vec2::new(734.0, 360.0), 30.0, 0.0));
        }

        let events = game.tick();

        let game_overs: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameLoopEvent::GameOver { .. }))
            .collect();
        assert_eq!(game_overs, vec![&GameLoopEvent::GameOver { score: 35, level: 1 }]);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameLoopEvent::PlayerDied { .. }))
                .count(),
            2
        );
        assert!(!game.state().running);

        // Stopped sessions stay silent
        assert!(game.tick().is_empty());
    }

    #[test]
    fn test_one_survivor_keeps_running() {
        let (mut game, _) = loop_with_players(2);
        {
            let state = game.state_mut();
            state.players[0].invincible = 0;
            state.players[0].lives = 1;
            state.bouncers.clear();
            state.bouncers.push(Bouncer::new(Vec2::new(66.0, 360.0), 30.0, 0.0));
        }

        let events = game.tick();

        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], GameLoopEvent::PlayerDied { .. }));
        assert!(game.state().running);
    }

    #[test]
    fn test_bullet_speed_pickup_lifecycle() {
        let (mut game, ids) = loop_with_players(1);
        {
            let state = game.state_mut();
            // Keep the player out of harm's way for the whole effect window
            state.players[0].invincible = 10_000;
            state
                .pickups
                .push(Pickup::new(Vec2::new(66.0, 390.0), PowerUpKind::BulletSpeed));
        }

        game.tick();
        let player = game.state().get_player(ids[0]).unwrap();
        assert_eq!(player.harpoon_speed, player.base_harpoon_speed * 1.5);
        assert_eq!(player.power_up.unwrap().remaining, 600);

        for _ in 0..599 {
            game.tick();
        }
        let player = game.state().get_player(ids[0]).unwrap();
        assert_eq!(player.harpoon_speed, player.base_harpoon_speed * 1.5);

        game.tick();
        let player = game.state().get_player(ids[0]).unwrap();
        assert_eq!(player.harpoon_speed, player.base_harpoon_speed);
        assert!(player.power_up.is_none());
    }

    #[test]
    fn test_seeded_loops_are_deterministic() {
        let run = || {
            let mut game = GameLoop::with_seed(Some(7));
            game.join(Uuid::nil()).unwrap();
            game.state_mut().players[0].invincible = 10_000;
            for _ in 0..500 {
                game.tick();
            }
            game.state()
                .bouncers
                .iter()
                .map(|b| (b.position.x, b.position.y, b.velocity.y))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
