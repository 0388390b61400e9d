use std::time::Duration;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Maximum number of concurrent game rooms
    pub max_rooms: usize,
    /// Seed for every room's RNG; thread RNG when unset
    pub rng_seed: Option<u64>,
    /// Ticks between snapshots while a session runs
    pub snapshot_interval: u64,
    /// Autopilot players joined by the headless runner
    pub headless_players: usize,
    /// Seconds between stats log lines
    pub stats_interval_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            max_rooms: 16,
            rng_seed: None,
            snapshot_interval: 1,
            headless_players: 2,
            stats_interval_secs: 30,
        }
    }
}

impl ServerConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(max_rooms) = lookup("MAX_ROOMS") {
            if let Ok(parsed) = max_rooms.parse::<usize>() {
                if parsed > 0 && parsed <= 10000 {
                    config.max_rooms = parsed;
                } else {
                    tracing::warn!("MAX_ROOMS must be 1-10000, using default");
                }
            } else {
                tracing::warn!("Invalid MAX_ROOMS '{}', using default", max_rooms);
            }
        }

        if let Some(seed) = lookup("RNG_SEED") {
            if let Ok(parsed) = seed.parse::<u64>() {
                config.rng_seed = Some(parsed);
            } else {
                tracing::warn!("Invalid RNG_SEED '{}', using thread RNG", seed);
            }
        }

        if let Some(interval) = lookup("SNAPSHOT_INTERVAL") {
            if let Ok(parsed) = interval.parse::<u64>() {
                if (1..=60).contains(&parsed) {
                    config.snapshot_interval = parsed;
                } else {
                    tracing::warn!("SNAPSHOT_INTERVAL must be 1-60, using default");
                }
            } else {
                tracing::warn!("Invalid SNAPSHOT_INTERVAL '{}', using default", interval);
            }
        }

        if let Some(players) = lookup("HEADLESS_PLAYERS") {
            if let Ok(parsed) = players.parse::<usize>() {
                if parsed <= 2 {
                    config.headless_players = parsed;
                } else {
                    tracing::warn!("HEADLESS_PLAYERS must be 0-2, using default");
                }
            } else {
                tracing::warn!("Invalid HEADLESS_PLAYERS '{}', using default", players);
            }
        }

        if let Some(secs) = lookup("STATS_INTERVAL_SECS") {
            if let Ok(parsed) = secs.parse::<u64>() {
                if (1..=3600).contains(&parsed) {
                    config.stats_interval_secs = parsed;
                } else {
                    tracing::warn!("STATS_INTERVAL_SECS must be 1-3600, using default");
                }
            } else {
                tracing::warn!("Invalid STATS_INTERVAL_SECS '{}', using default", secs);
            }
        }

        config
    }

    pub fn stats_interval(&self) -> Duration {
        Duration::from_secs(self.stats_interval_secs)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), String> {
        if self.max_rooms == 0 {
            return Err("max_rooms must be at least 1".to_string());
        }
        if self.snapshot_interval == 0 {
            return Err("snapshot_interval must be at least 1".to_string());
        }
        if self.headless_players > crate::game::constants::world::MAX_PLAYERS {
            return Err("headless_players cannot exceed the room size".to_string());
        }
        if self.stats_interval_secs == 0 {
            return Err("stats_interval_secs must be at least 1".to_string());
        }
        Ok(())
    }
}
