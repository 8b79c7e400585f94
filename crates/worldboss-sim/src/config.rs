//! World boss configuration.
//!
//! Loaded from the `[worldboss]` table of the host's TOML file. Every field
//! has a default, so an empty table is a valid configuration.

use serde::{Deserialize, Serialize};

use worldboss_core::constants::{secs_to_ticks, DESPAWN_IDLE_SECS, DESPAWN_WATCH_RADIUS};
use worldboss_core::error::BossError;

fn default_enabled() -> bool {
    true
}

fn default_seed() -> u64 {
    42
}

fn default_max_concurrent() -> usize {
    2
}

/// Top-level switches and nested spawn/despawn tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldBossConfig {
    /// Whether the scheduler runs at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// RNG seed. Same seed, same proposals.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Cap on simultaneously active bosses (forced spawns excepted).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    #[serde(default)]
    pub spawn: SpawnSettings,
    #[serde(default)]
    pub despawn: DespawnSettings,
    #[serde(default)]
    pub modifiers: ModifierSettings,
}

// Spawn defaults

fn default_check_interval_secs() -> u64 {
    300
}

fn default_min_interval_minutes() -> u64 {
    20
}

fn default_max_interval_minutes() -> u64 {
    40
}

fn default_chance() -> f64 {
    0.15
}

fn default_min_radius() -> f64 {
    20.0
}

fn default_max_radius() -> f64 {
    40.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnSettings {
    /// Seconds of simulated time between scheduler checks.
    #[serde(default = "default_check_interval_secs")]
    pub check_interval_secs: u64,
    /// Lower bound of the wall-clock interval between attempts.
    #[serde(default = "default_min_interval_minutes")]
    pub min_interval_minutes: u64,
    /// Upper bound (exclusive) of the wall-clock interval between attempts.
    #[serde(default = "default_max_interval_minutes")]
    pub max_interval_minutes: u64,
    /// Probability that an attempt goes ahead.
    #[serde(default = "default_chance")]
    pub chance: f64,
    /// Candidate distance range around the anchor player.
    #[serde(default = "default_min_radius")]
    pub min_radius: f64,
    #[serde(default = "default_max_radius")]
    pub max_radius: f64,
}

// Despawn defaults

fn default_idle_secs() -> u64 {
    DESPAWN_IDLE_SECS
}

fn default_watch_radius() -> f64 {
    DESPAWN_WATCH_RADIUS
}

fn default_despawn_check_secs() -> u64 {
    30
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DespawnSettings {
    /// Wall-clock seconds without a nearby player before despawn.
    #[serde(default = "default_idle_secs")]
    pub idle_secs: u64,
    #[serde(default = "default_watch_radius")]
    pub watch_radius: f64,
    /// Seconds of simulated time between watch checks.
    #[serde(default = "default_despawn_check_secs")]
    pub check_interval_secs: u64,
}

/// Procedural traits, stat multipliers, and generated names. Off by default,
/// which keeps every boss at its catalog numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModifierSettings {
    #[serde(default)]
    pub enabled: bool,
}

impl Default for WorldBossConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            seed: default_seed(),
            max_concurrent: default_max_concurrent(),
            spawn: SpawnSettings::default(),
            despawn: DespawnSettings::default(),
            modifiers: ModifierSettings::default(),
        }
    }
}

impl Default for SpawnSettings {
    fn default() -> Self {
        Self {
            check_interval_secs: default_check_interval_secs(),
            min_interval_minutes: default_min_interval_minutes(),
            max_interval_minutes: default_max_interval_minutes(),
            chance: default_chance(),
            min_radius: default_min_radius(),
            max_radius: default_max_radius(),
        }
    }
}

impl Default for DespawnSettings {
    fn default() -> Self {
        Self {
            idle_secs: default_idle_secs(),
            watch_radius: default_watch_radius(),
            check_interval_secs: default_despawn_check_secs(),
        }
    }
}

impl SpawnSettings {
    pub fn check_interval_ticks(&self) -> u64 {
        secs_to_ticks(self.check_interval_secs)
    }
}

impl DespawnSettings {
    pub fn check_interval_ticks(&self) -> u64 {
        secs_to_ticks(self.check_interval_secs)
    }

    pub fn idle_millis(&self) -> u64 {
        self.idle_secs.saturating_mul(1000)
    }
}

impl WorldBossConfig {
    /// Parse and validate a TOML document containing only this table's fields.
    pub fn from_toml_str(content: &str) -> Result<Self, BossError> {
        let config: WorldBossConfig =
            toml::from_str(content).map_err(|e| BossError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), BossError> {
        if self.max_concurrent == 0 {
            return Err(BossError::Config("max_concurrent must be at least 1".into()));
        }
        let spawn = &self.spawn;
        if spawn.check_interval_secs == 0 {
            return Err(BossError::Config("spawn.check_interval_secs must be positive".into()));
        }
        if spawn.min_interval_minutes > spawn.max_interval_minutes {
            return Err(BossError::Config(format!(
                "spawn interval min ({}) exceeds max ({})",
                spawn.min_interval_minutes, spawn.max_interval_minutes
            )));
        }
        if !(0.0..=1.0).contains(&spawn.chance) {
            return Err(BossError::Config(format!(
                "spawn.chance must be within [0, 1], got {}",
                spawn.chance
            )));
        }
        if spawn.min_radius < 0.0 || spawn.min_radius > spawn.max_radius {
            return Err(BossError::Config(format!(
                "spawn radius range {}-{} is invalid",
                spawn.min_radius, spawn.max_radius
            )));
        }
        if self.despawn.check_interval_secs == 0 {
            return Err(BossError::Config("despawn.check_interval_secs must be positive".into()));
        }
        if self.despawn.watch_radius <= 0.0 {
            return Err(BossError::Config("despawn.watch_radius must be positive".into()));
        }
        Ok(())
    }
}
