//! Runtime behavior of procedural traits.
//!
//! These run alongside the archetype strategy and return effects in the same
//! vocabulary. Traits not handled here only shape the boss's stats.

use worldboss_core::constants::*;
use worldboss_core::enums::StatusEffectKind;
use worldboss_core::modifiers::{BossModifiers, BossTrait};
use worldboss_core::types::PlayerId;

use crate::strategy::{AbilityEffect, BossView};

/// Once-per-second trait effects: regeneration and the aura traits.
pub fn pulse(modifiers: &BossModifiers, view: &BossView) -> Vec<AbilityEffect> {
    let mut effects = Vec::new();
    let zone = view.zone as f64;

    if modifiers.regeneration_per_sec > 0.0 && view.health < view.max_health {
        effects.push(AbilityEffect::HealSelf {
            amount: modifiers.regeneration_per_sec,
        });
    }

    if modifiers.has_trait(BossTrait::Burning) {
        let radius = (BURN_AURA_BASE_RADIUS + zone * 0.1).min(BURN_AURA_MAX_RADIUS);
        for player in view.players_within(radius) {
            effects.push(AbilityEffect::ApplyStatus {
                player: player.id,
                kind: StatusEffectKind::Burning,
                amplifier: 0,
                duration_ticks: 40 + view.zone as u64 * 2,
            });
        }
    }

    if modifiers.has_trait(BossTrait::Frozen) {
        let amplifier = (1 + view.zone / 20).min(3) as u8;
        for player in view.players_within(FROST_AURA_RADIUS).filter(|p| !p.slowed) {
            effects.push(AbilityEffect::ApplyStatus {
                player: player.id,
                kind: StatusEffectKind::Slowness,
                amplifier,
                duration_ticks: 40 + view.zone as u64,
            });
        }
    }

    if modifiers.has_trait(BossTrait::Cursed) {
        let radius = (CURSE_AURA_BASE_RADIUS + zone * 0.1).min(CURSE_AURA_MAX_RADIUS);
        let amplifier = (view.zone / 30).min(1) as u8;
        for player in view.players_within(radius) {
            effects.push(AbilityEffect::ApplyStatus {
                player: player.id,
                kind: StatusEffectKind::Darkness,
                amplifier,
                duration_ticks: 60 + view.zone as u64 * 2,
            });
        }
    }

    if modifiers.has_trait(BossTrait::Stormy) && view.roll < STORM_CHANCE {
        let targets: Vec<_> = view.players_within(STORM_RADIUS).collect();
        if !targets.is_empty() {
            // Rescale the roll that passed the chance check to pick a target.
            let index = ((view.roll / STORM_CHANCE) * targets.len() as f64) as usize;
            let target = targets[index.min(targets.len() - 1)];
            effects.push(AbilityEffect::DamagePlayer {
                player: target.id,
                amount: STORM_BASE_DAMAGE + zone * STORM_DAMAGE_PER_ZONE,
            });
            effects.push(AbilityEffect::Message {
                player: target.id,
                text: "Lightning strikes you!".into(),
            });
        }
    }

    effects
}

/// The boss landed `amount` damage on `victim`.
pub fn on_attack_landed(
    modifiers: &BossModifiers,
    view: &BossView,
    victim: PlayerId,
    amount: f64,
) -> Vec<AbilityEffect> {
    let mut effects = Vec::new();

    if modifiers.has_trait(BossTrait::Venomous) {
        effects.push(AbilityEffect::ApplyStatus {
            player: victim,
            kind: StatusEffectKind::Poison,
            amplifier: VENOM_AMPLIFIER,
            duration_ticks: VENOM_TICKS,
        });
        effects.push(AbilityEffect::Message {
            player: victim,
            text: "You are poisoned!".into(),
        });
    }

    if modifiers.lifesteal_fraction > 0.0 {
        let frenzy = modifiers.has_trait(BossTrait::Berserker)
            && view.health_fraction() < BLOOD_FRENZY_FRACTION;
        let fraction = if frenzy {
            modifiers.lifesteal_fraction * 2.0
        } else {
            modifiers.lifesteal_fraction
        };
        effects.push(AbilityEffect::HealSelf {
            amount: amount * fraction,
        });
        if frenzy {
            effects.push(AbilityEffect::Message {
                player: victim,
                text: "Blood frenzy! The boss drinks deep!".into(),
            });
        }
    }

    effects
}

/// `attacker` landed `amount` damage on the boss.
pub fn on_hit_taken(modifiers: &BossModifiers, attacker: PlayerId, amount: f64) -> Vec<AbilityEffect> {
    if modifiers.thorns_fraction <= 0.0 || amount <= 0.0 {
        return Vec::new();
    }
    vec![AbilityEffect::DamagePlayer {
        player: attacker,
        amount: amount * modifiers.thorns_fraction,
    }]
}
