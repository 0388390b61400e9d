use serde::{Deserialize, Serialize};

use crate::game::entities::{
    ActivePowerUp, Bouncer, Harpoon, HarpoonPhase, Pickup, Player, PlayerColor, PowerUpKind, Slot,
};
use crate::game::game_loop::PlayerIntent;
use crate::game::state::{PlayerId, Session};
use crate::util::vec2::Vec2;

/// Messages from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ClientMessage {
    /// Request a slot in the room
    JoinRequest,
    /// Key or button state change
    Input { action: InputAction, pressed: bool },
    /// Leave the room
    Leave,
}

/// Client-side controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputAction {
    Left,
    Right,
    Shoot,
}

impl InputAction {
    /// Engine intent for this control change; shoot fires on press only
    pub fn intent(self, pressed: bool) -> Option<PlayerIntent> {
        match self {
            InputAction::Left => Some(PlayerIntent::MoveLeft(pressed)),
            InputAction::Right => Some(PlayerIntent::MoveRight(pressed)),
            InputAction::Shoot if pressed => Some(PlayerIntent::Shoot),
            InputAction::Shoot => None,
        }
    }
}

/// Messages from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ServerMessage {
    /// Join succeeded; the player controls `slot`
    JoinAccepted {
        player_id: PlayerId,
        slot: Slot,
        color: PlayerColor,
    },
    /// Join was rejected
    JoinRejected { reason: String },
    /// Another player entered the room
    PlayerJoined { player_id: PlayerId, color: PlayerColor },
    /// A player left the room
    PlayerLeft { player_id: PlayerId },
    /// Full session state
    Snapshot(GameSnapshot),
    /// Game event notification
    Event(GameEvent),
}

/// Game events that clients should be notified about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Wave cleared, next level started
    LevelAdvanced { level: u32 },
    /// Every player is dead
    GameOver { score: u32, level: u32 },
}

/// Full session state for network transmission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub tick: u64,
    pub players: Vec<PlayerSnapshot>,
    pub bouncers: Vec<BouncerSnapshot>,
    pub pickups: Vec<PickupSnapshot>,
    pub score: u32,
    pub level: u32,
    pub running: bool,
}

impl GameSnapshot {
    pub fn from_session(session: &Session) -> Self {
        Self {
            tick: session.tick,
            players: session.players.iter().map(PlayerSnapshot::from_player).collect(),
            bouncers: session.bouncers.iter().map(BouncerSnapshot::from_bouncer).collect(),
            pickups: session
                .pickups
                .iter()
                .filter(|p| p.active)
                .map(PickupSnapshot::from_pickup)
                .collect(),
            score: session.score,
            level: session.level,
            running: session.running,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub color: PlayerColor,
    /// Top-left of the body
    pub position: Vec2,
    pub lives: u32,
    pub alive: bool,
    pub invincible: u32,
    pub harpoon: Option<HarpoonSnapshot>,
    pub power_up: Option<ActivePowerUp>,
}

impl PlayerSnapshot {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id,
            color: player.color(),
            position: player.position,
            lives: player.lives,
            alive: player.alive,
            invincible: player.invincible,
            harpoon: player
                .harpoon
                .as_ref()
                .filter(|h| h.is_active())
                .map(HarpoonSnapshot::from_harpoon),
            power_up: player.power_up,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarpoonSnapshot {
    pub x: f32,
    pub launch_y: f32,
    /// Current tip height
    pub y: f32,
    pub width: f32,
    pub color: PlayerColor,
    pub holding: bool,
}

impl HarpoonSnapshot {
    pub fn from_harpoon(harpoon: &Harpoon) -> Self {
        Self {
            x: harpoon.x,
            launch_y: harpoon.launch_y,
            y: harpoon.y,
            width: harpoon.width,
            color: harpoon.color,
            holding: harpoon.phase == HarpoonPhase::Holding,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BouncerSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub radius: f32,
}

impl BouncerSnapshot {
    pub fn from_bouncer(bouncer: &Bouncer) -> Self {
        Self {
            position: bouncer.position,
            velocity: bouncer.velocity,
            radius: bouncer.radius,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PickupSnapshot {
    /// Centre of the pickup box
    pub position: Vec2,
    pub kind: PowerUpKind,
    /// Ticks before it vanishes
    pub timer: u32,
}

impl PickupSnapshot {
    pub fn from_pickup(pickup: &Pickup) -> Self {
        Self {
            position: pickup.position,
            kind: pickup.kind,
            timer: pickup.timer,
        }
    }
}

/// Encode a message using bincode
/// Uses legacy config for fixed-size integers
pub fn encode<T: Serialize>(message: &T) -> Result<Vec<u8>, EncodeError> {
    bincode::serde::encode_to_vec(message, bincode::config::legacy())
        .map_err(|e| EncodeError(e.to_string()))
}

/// Decode a message using bincode
pub fn decode<T: for<'de> Deserialize<'de>>(data: &[u8]) -> Result<T, DecodeError> {
    bincode::serde::decode_from_slice(data, bincode::config::legacy())
        .map(|(msg, _)| msg)
        .map_err(|e| DecodeError(e.to_string()))
}

/// JSON rendering for browser clients and debugging
pub fn to_json<T: Serialize>(message: &T) -> Result<String, EncodeError> {
    serde_json::to_string(message).map_err(|e| EncodeError(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
#[error("Encode error: {0}")]
pub struct EncodeError(String);

#[derive(Debug, thiserror::Error)]
#[error("Decode error: {0}")]
pub struct DecodeError(String);

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn populated_session() -> Session {
        let mut session = Session::new();
        let mut player = Player::new(Uuid::new_v4(), Slot::Left);
        player.shoot();
        player.apply_power_up(PowerUpKind::FixedRope);
        session.add_player(player);
        session.add_player(Player::new(Uuid::new_v4(), Slot::Right));
        session
            .bouncers
            .push(Bouncer::new(Vec2::new(200.0, 80.0), 30.0, 1.0));
        session
            .pickups
            .push(Pickup::new(Vec2::new(300.0, 390.0), PowerUpKind::BulletSpeed));
        let mut expired = Pickup::new(Vec2::new(400.0, 390.0), PowerUpKind::FixedRope);
        expired.active = false;
        session.pickups.push(expired);
        session.score = 42;
        session.level = 3;
        session.running = true;
        session.tick = 900;
        session
    }

    #[test]
    fn test_input_action_intents() {
        assert_eq!(InputAction::Left.intent(true), Some(PlayerIntent::MoveLeft(true)));
        assert_eq!(InputAction::Right.intent(false), Some(PlayerIntent::MoveRight(false)));
        assert_eq!(InputAction::Shoot.intent(true), Some(PlayerIntent::Shoot));
        assert_eq!(InputAction::Shoot.intent(false), None);
    }

    #[test]
    fn test_client_message_input() {
        let msg = ClientMessage::Input {
            action: InputAction::Right,
            pressed: true,
        };
        let encoded = encode(&msg).unwrap();
        let decoded: ClientMessage = decode(&encoded).unwrap();
        match decoded {
            ClientMessage::Input { action, pressed } => {
                assert_eq!(action, InputAction::Right);
                assert!(pressed);
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_snapshot_from_session() {
        let session = populated_session();
        let snapshot = GameSnapshot::from_session(&session);

        assert_eq!(snapshot.tick, 900);
        assert_eq!(snapshot.score, 42);
        assert_eq!(snapshot.level, 3);
        assert!(snapshot.running);
        assert_eq!(snapshot.players.len(), 2);
        assert_eq!(snapshot.bouncers.len(), 1);
        // Inactive pickups are not sent
        assert_eq!(snapshot.pickups.len(), 1);

        let shooter = &snapshot.players[0];
        assert_eq!(shooter.color, PlayerColor::Red);
        let harpoon = shooter.harpoon.as_ref().unwrap();
        assert_eq!(harpoon.x, 66.0);
        assert!(!harpoon.holding);
        assert_eq!(shooter.power_up.unwrap().kind, PowerUpKind::FixedRope);
        assert!(snapshot.players[1].harpoon.is_none());
    }

    #[test]
    fn test_snapshot_binary_round_trip() {
        let snapshot = GameSnapshot::from_session(&populated_session());
        let encoded = encode(&ServerMessage::Snapshot(snapshot)).unwrap();
        let decoded: ServerMessage = decode(&encoded).unwrap();
        match decoded {
            ServerMessage::Snapshot(s) => {
                assert_eq!(s.players.len(), 2);
                assert_eq!(s.bouncers[0].radius, 30.0);
                assert_eq!(s.pickups[0].kind, PowerUpKind::BulletSpeed);
            }
            _ => panic!("Wrong message type"),
        }
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = GameSnapshot::from_session(&populated_session());
        let json = to_json(&snapshot).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["score"], 42);
        assert_eq!(value["players"][0]["color"], "red");
        assert_eq!(value["players"][1]["color"], "blue");
        assert_eq!(value["pickups"][0]["kind"], "bulletSpeed");
    }

    #[test]
    fn test_game_event_layout() {
        // Legacy config: u32 variant index then fixed-width u32 fields
        let encoded = encode(&GameEvent::LevelAdvanced { level: 3 }).unwrap();
        assert_eq!(encoded, vec![0, 0, 0, 0, 3, 0, 0, 0]);

        let encoded = encode(&GameEvent::GameOver { score: 258, level: 1 }).unwrap();
        assert_eq!(encoded, vec![1, 0, 0, 0, 2, 1, 0, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn test_invalid_decode() {
        let garbage = vec![0xFF, 0xFE, 0xFD];
        let result: Result<ClientMessage, _> = decode(&garbage);
        assert!(result.is_err());
    }
}
