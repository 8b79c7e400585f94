//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! The host world owns players, projectiles, and loot; the boss subsystem
//! owns boss and minion entities.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{BossId, LootItem, PlayerId};

/// Marks an entity as a world boss and links it to its instance record.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BossTag {
    pub boss_id: BossId,
    pub archetype: BossArchetype,
}

/// Marks a summoned minion and the boss that owns it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Minion {
    pub owner: BossId,
}

/// An online player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

/// Facing direction in radians (0 = North, clockwise).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Heading {
    pub yaw: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

impl Health {
    pub fn full(max: f64) -> Self {
        Self { current: max, max }
    }

    /// Current health as a fraction of max, clamped to [0, 1].
    pub fn fraction(&self) -> f64 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.current / self.max).clamp(0.0, 1.0)
    }
}

/// Base melee damage dealt per hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AttackDamage {
    pub value: f64,
}

/// Size multiplier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scale {
    pub factor: f64,
}

/// Movement speed multiplier for the host's pathing.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveSpeed {
    pub factor: f64,
}

/// Outline visible through terrain.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Glowing;

/// Entity is hidden from players.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Invisible;

/// Damage resistance level. Each level removes a fixed share of incoming damage.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Resistance {
    pub level: u8,
}

/// One timed status effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatusEffect {
    pub kind: StatusEffectKind,
    pub amplifier: u8,
    pub expires_at_tick: u64,
}

/// Timed status effects currently applied to an entity.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusEffects {
    pub effects: Vec<StatusEffect>,
}

impl StatusEffects {
    /// Whether an unexpired effect of this kind is present.
    pub fn has(&self, kind: StatusEffectKind, tick: u64) -> bool {
        self.effects
            .iter()
            .any(|e| e.kind == kind && e.expires_at_tick > tick)
    }
}

/// A projectile in flight. `shooter` is set only when a player fired it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub shooter: Option<PlayerId>,
}

/// A primed explosive. `source` is set only when a player lit it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Explosive {
    pub source: Option<PlayerId>,
}

/// A lingering area effect (thrown potion cloud).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EffectCloud {
    pub source: Option<PlayerId>,
}

/// An item lying on the ground.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DroppedItem {
    pub item: LootItem,
}
