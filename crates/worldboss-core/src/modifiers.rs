//! Procedural boss modifiers: traits, stat multipliers, and generated names.
//!
//! A boss without modifiers carries [`BossModifiers::neutral`], which leaves
//! every catalog formula untouched.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossTrait {
    // Offensive
    Enraged,
    Berserker,
    Venomous,
    Explosive,
    // Defensive
    Armored,
    Regenerating,
    Vampiric,
    Thorns,
    // Mobility
    Swift,
    Teleporter,
    Phasing,
    // Ability
    Empowered,
    Relentless,
    Cursed,
    // Environmental
    Burning,
    Frozen,
    Stormy,
}

/// Static data for one trait. Multipliers compose by product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraitProfile {
    pub name: &'static str,
    pub damage_multiplier: f64,
    pub health_multiplier: f64,
    /// Applied to the ability cooldown; below 1 fires more often.
    pub cooldown_multiplier: f64,
    pub speed_multiplier: f64,
    /// Shown on the health bar.
    pub symbol: &'static str,
    pub description: &'static str,
}

const fn profile(
    name: &'static str,
    damage: f64,
    health: f64,
    cooldown: f64,
    speed: f64,
    symbol: &'static str,
    description: &'static str,
) -> TraitProfile {
    TraitProfile {
        name,
        damage_multiplier: damage,
        health_multiplier: health,
        cooldown_multiplier: cooldown,
        speed_multiplier: speed,
        symbol,
        description,
    }
}

impl BossTrait {
    pub const ALL: [BossTrait; 17] = [
        BossTrait::Enraged,
        BossTrait::Berserker,
        BossTrait::Venomous,
        BossTrait::Explosive,
        BossTrait::Armored,
        BossTrait::Regenerating,
        BossTrait::Vampiric,
        BossTrait::Thorns,
        BossTrait::Swift,
        BossTrait::Teleporter,
        BossTrait::Phasing,
        BossTrait::Empowered,
        BossTrait::Relentless,
        BossTrait::Cursed,
        BossTrait::Burning,
        BossTrait::Frozen,
        BossTrait::Stormy,
    ];

    pub fn profile(self) -> TraitProfile {
        match self {
            BossTrait::Enraged => profile("Enraged", 1.5, 1.0, 0.7, 1.0, "⚔", "+50% damage, abilities 30% faster"),
            BossTrait::Berserker => profile("Berserker", 1.3, 0.7, 1.2, 1.0, "💀", "+30% damage, -30% health"),
            BossTrait::Venomous => profile("Venomous", 1.0, 1.0, 1.0, 1.0, "☠", "Poisons the players it hits"),
            BossTrait::Explosive => profile("Explosive", 1.0, 0.9, 1.1, 1.0, "💥", "Volatile and fragile"),
            BossTrait::Armored => profile("Armored", 0.7, 1.3, 0.8, 1.2, "🛡", "Very tough"),
            BossTrait::Regenerating => profile("Regenerating", 0.8, 1.1, 1.0, 1.0, "❤", "Slowly heals itself"),
            BossTrait::Vampiric => profile("Vampiric", 1.0, 1.0, 1.0, 1.0, "🦇", "Steals life with every hit"),
            BossTrait::Thorns => profile("Thorny", 0.9, 1.2, 0.9, 1.0, "✹", "Reflects part of the damage it takes"),
            BossTrait::Swift => profile("Swift", 1.2, 0.8, 1.0, 1.4, "💨", "Moves very fast"),
            BossTrait::Teleporter => profile("Blinking", 1.0, 0.9, 1.0, 1.1, "✦", "Hard to pin down"),
            BossTrait::Phasing => profile("Spectral", 1.1, 0.85, 1.0, 1.0, "👻", "Half in another world"),
            BossTrait::Empowered => profile("Empowered", 1.0, 1.0, 0.7, 1.0, "✧", "Abilities 30% faster"),
            BossTrait::Relentless => profile("Relentless", 1.0, 1.0, 0.9, 1.0, "🔥", "Cannot be knocked back"),
            BossTrait::Cursed => profile("Cursed", 1.0, 1.0, 1.0, 1.0, "☽", "Blinds nearby players"),
            BossTrait::Burning => profile("Blazing", 1.0, 1.0, 1.1, 1.0, "♨", "Sets nearby players on fire"),
            BossTrait::Frozen => profile("Glacial", 0.9, 1.1, 1.0, 0.85, "❄", "Slows nearby players"),
            BossTrait::Stormy => profile("Stormy", 1.0, 1.0, 1.0, 1.0, "⚡", "Calls down lightning"),
        }
    }
}

/// A generated boss name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProceduralName {
    pub display_name: String,
    /// Upper-case form for titles and the health bar.
    pub title_name: String,
}

/// Everything that makes one spawned boss differ from its archetype.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossModifiers {
    pub seed: u64,
    pub traits: Vec<BossTrait>,
    /// `None` keeps the catalog name.
    pub name: Option<ProceduralName>,
    pub health_multiplier: f64,
    pub damage_multiplier: f64,
    pub speed_multiplier: f64,
    pub scale_multiplier: f64,
    pub cooldown_multiplier: f64,
    /// Health restored per second.
    pub regeneration_per_sec: f64,
    /// Fraction of dealt damage healed back.
    pub lifesteal_fraction: f64,
    /// Fraction of taken damage reflected to the attacker.
    pub thorns_fraction: f64,
}

impl Default for BossModifiers {
    fn default() -> Self {
        Self::neutral()
    }
}

impl BossModifiers {
    pub fn neutral() -> Self {
        Self {
            seed: 0,
            traits: Vec::new(),
            name: None,
            health_multiplier: 1.0,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            scale_multiplier: 1.0,
            cooldown_multiplier: 1.0,
            regeneration_per_sec: 0.0,
            lifesteal_fraction: 0.0,
            thorns_fraction: 0.0,
        }
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }

    pub fn has_trait(&self, t: BossTrait) -> bool {
        self.traits.contains(&t)
    }

    /// Overall difficulty, 1.0 for a neutral boss.
    pub fn difficulty_multiplier(&self) -> f64 {
        (self.health_multiplier + self.damage_multiplier + 1.0 / self.cooldown_multiplier) / 3.0
    }

    /// Trait symbols for the health bar, e.g. `"[⚔❄]"`. `None` without traits.
    pub fn bar_indicator(&self) -> Option<String> {
        if self.traits.is_empty() {
            return None;
        }
        let symbols: String = self.traits.iter().map(|t| t.profile().symbol).collect();
        Some(format!("[{symbols}]"))
    }

    /// Trait names joined for chat, e.g. `"Enraged | Glacial"`.
    pub fn traits_description(&self) -> String {
        self.traits
            .iter()
            .map(|t| t.profile().name)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
