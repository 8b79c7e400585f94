//! Enumeration types used throughout the subsystem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BossError;

/// The closed set of boss kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BossArchetype {
    /// Tank that hooks players toward itself.
    TheButcher,
    /// Assassin that vanishes and reappears behind a player.
    ShadowUnstable,
    /// Caster whose fire circles heal it while players stand inside.
    Pyromancer,
    /// Summoner, invincible while her minions live.
    HordeQueen,
    /// Controller that slows and chills everything around it.
    IceBreaker,
}

impl BossArchetype {
    pub const ALL: [BossArchetype; 5] = [
        BossArchetype::TheButcher,
        BossArchetype::ShadowUnstable,
        BossArchetype::Pyromancer,
        BossArchetype::HordeQueen,
        BossArchetype::IceBreaker,
    ];

    /// Stable identifier used by admin commands and logs.
    pub fn id(&self) -> &'static str {
        match self {
            BossArchetype::TheButcher => "THE_BUTCHER",
            BossArchetype::ShadowUnstable => "SHADOW_UNSTABLE",
            BossArchetype::Pyromancer => "PYROMANCER",
            BossArchetype::HordeQueen => "HORDE_QUEEN",
            BossArchetype::IceBreaker => "ICE_BREAKER",
        }
    }
}

impl fmt::Display for BossArchetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for BossArchetype {
    type Err = BossError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        BossArchetype::ALL
            .into_iter()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| BossError::UnknownArchetype(s.to_string()))
    }
}

/// Lifecycle of one boss instance. Transitions are one-way:
/// Pending -> Active -> (Dead | Despawned).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    Pending,
    Active,
    Dead,
    Despawned,
}

impl LifecycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Dead | LifecycleState::Despawned)
    }
}

/// Item rarity tiers, ordered from worst to best.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

/// Timed status effects a boss can apply to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatusEffectKind {
    Slowness,
    MiningFatigue,
    Darkness,
    Burning,
    Poison,
    Speed,
}

/// Coarse block classification used by spawn-location checks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Air,
    Solid,
    Liquid,
}

impl BlockKind {
    pub fn is_solid(&self) -> bool {
        matches!(self, BlockKind::Solid)
    }

    pub fn is_liquid(&self) -> bool {
        matches!(self, BlockKind::Liquid)
    }
}

/// Why an instance left the Active state without being killed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DespawnReason {
    /// No player within the watch radius for the idle duration.
    Idle,
    /// The world entity disappeared outside this subsystem's control.
    EntityLost,
    /// The entity died but no killer could be attributed.
    NoKiller,
    /// Cleared by an admin or by service shutdown.
    Cleared,
}

impl fmt::Display for DespawnReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            DespawnReason::Idle => "no player nearby for the idle duration",
            DespawnReason::EntityLost => "entity no longer exists",
            DespawnReason::NoKiller => "no killer identified",
            DespawnReason::Cleared => "cleared",
        };
        f.write_str(text)
    }
}
