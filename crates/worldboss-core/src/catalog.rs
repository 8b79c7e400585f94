//! Immutable per-archetype data.
//!
//! One entry per boss kind. Entries are built on demand from constant data
//! and never mutated at runtime.

use crate::constants::{DAMAGE_PER_ZONE, HEALTH_PER_ZONE};
use crate::enums::BossArchetype;
use crate::types::ZoneId;

/// Static description of one boss archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossProfile {
    pub archetype: BossArchetype,
    /// Name used in chat and summaries.
    pub display_name: &'static str,
    /// Banner name used in health bar titles.
    pub title_name: &'static str,
    /// Size multiplier applied to the entity.
    pub scale: f64,
    pub base_health: f64,
    pub base_damage: f64,
    /// Seconds between ability firings. 0 means the ability is event-driven.
    pub ability_cooldown_secs: u32,
    pub ability_description: &'static str,
}

impl BossProfile {
    /// Maximum health at the given zone level.
    pub fn health_at(&self, zone: ZoneId) -> f64 {
        self.base_health * (1.0 + zone as f64 * HEALTH_PER_ZONE)
    }

    /// Melee damage at the given zone level.
    pub fn damage_at(&self, zone: ZoneId) -> f64 {
        self.base_damage * (1.0 + zone as f64 * DAMAGE_PER_ZONE)
    }

    /// Whether the ability runs on a timer.
    pub fn is_timer_driven(&self) -> bool {
        self.ability_cooldown_secs > 0
    }
}

/// Get the catalog entry for an archetype.
pub fn get_profile(archetype: BossArchetype) -> BossProfile {
    match archetype {
        BossArchetype::TheButcher => BossProfile {
            archetype,
            display_name: "The Butcher",
            title_name: "THE BUTCHER",
            scale: 3.0,
            base_health: 2000.0,
            base_damage: 25.0,
            ability_cooldown_secs: 15,
            ability_description: "Hook - pulls players toward it",
        },
        BossArchetype::ShadowUnstable => BossProfile {
            archetype,
            display_name: "The Unstable Shadow",
            title_name: "THE UNSTABLE SHADOW",
            scale: 1.5,
            base_health: 1200.0,
            base_damage: 40.0,
            ability_cooldown_secs: 10,
            ability_description: "Invisibility - teleports behind players",
        },
        BossArchetype::Pyromancer => BossProfile {
            archetype,
            display_name: "The Zombie Pyromancer",
            title_name: "THE ZOMBIE PYROMANCER",
            scale: 2.0,
            base_health: 1500.0,
            base_damage: 30.0,
            ability_cooldown_secs: 12,
            ability_description: "Fire circle - heals while players stand inside",
        },
        BossArchetype::HordeQueen => BossProfile {
            archetype,
            display_name: "The Horde Queen",
            title_name: "THE HORDE QUEEN",
            scale: 4.0,
            base_health: 2500.0,
            base_damage: 20.0,
            // No cooldown: summons are driven by health thresholds.
            ability_cooldown_secs: 0,
            ability_description: "Summoning - invincible while minions live",
        },
        BossArchetype::IceBreaker => BossProfile {
            archetype,
            display_name: "The Ice Breaker",
            title_name: "THE ICE BREAKER",
            scale: 3.0,
            base_health: 1800.0,
            base_damage: 35.0,
            ability_cooldown_secs: 8,
            ability_description: "Freeze - slows and chills the ground",
        },
    }
}
