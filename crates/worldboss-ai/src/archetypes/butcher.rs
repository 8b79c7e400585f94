//! The Butcher: hooks nearby players and hardens as it lands hits.

use glam::DVec2;

use worldboss_core::constants::*;
use worldboss_core::enums::StatusEffectKind;
use worldboss_core::types::{PlayerId, Velocity};

use crate::strategy::{AbilityEffect, BehaviorState, BehaviorUpdate, BossView};

/// Pull every player in hook range toward the boss and slow them.
pub fn hook(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let boss = DVec2::new(view.position.x, view.position.y);
    let mut effects = Vec::new();

    for player in view.players_within(BUTCHER_HOOK_RADIUS) {
        let toward = boss - DVec2::new(player.position.x, player.position.y);
        if toward.length_squared() <= f64::EPSILON {
            continue;
        }
        let pull = toward.normalize() * BUTCHER_HOOK_STRENGTH;
        effects.push(AbilityEffect::Launch {
            player: player.id,
            velocity: Velocity::new(pull.x, pull.y, BUTCHER_HOOK_LIFT),
        });
        effects.push(AbilityEffect::ApplyStatus {
            player: player.id,
            kind: StatusEffectKind::Slowness,
            amplifier: BUTCHER_HOOK_SLOW_AMPLIFIER,
            duration_ticks: BUTCHER_HOOK_SLOW_TICKS,
        });
        effects.push(AbilityEffect::Message {
            player: player.id,
            text: format!("You are being dragged toward {}!", super::name(view.archetype)),
        });
    }

    effects.push(AbilityEffect::Announce {
        radius: ANNOUNCE_RADIUS,
        text: format!("{} uses Hook!", super::name(view.archetype)),
    });

    BehaviorUpdate {
        state: state.clone(),
        effects,
    }
}

/// Count landed hits; every few hits buys one resistance level.
pub fn on_attack_landed(view: &BossView, state: &BehaviorState, _victim: PlayerId) -> BehaviorUpdate {
    let BehaviorState::Butcher {
        attacks_landed,
        resistance_level,
    } = *state
    else {
        return BehaviorUpdate::unchanged(state);
    };

    let attacks_landed = attacks_landed + 1;
    if attacks_landed < BUTCHER_ATTACKS_PER_RESISTANCE || resistance_level >= BUTCHER_MAX_RESISTANCE {
        return BehaviorUpdate {
            state: BehaviorState::Butcher {
                attacks_landed,
                resistance_level,
            },
            effects: Vec::new(),
        };
    }

    let level = resistance_level + 1;
    BehaviorUpdate {
        state: BehaviorState::Butcher {
            attacks_landed: 0,
            resistance_level: level,
        },
        effects: vec![
            AbilityEffect::SetResistance { level },
            AbilityEffect::Announce {
                radius: ANNOUNCE_RADIUS,
                text: format!(
                    "{} grows more resistant! (Level {})",
                    super::name(view.archetype),
                    level
                ),
            },
        ],
    }
}

pub fn bar_status(_view: &BossView, state: &BehaviorState) -> Option<String> {
    match state {
        BehaviorState::Butcher {
            resistance_level, ..
        } if *resistance_level > 0 => Some(format!("[Resistance: {resistance_level}]")),
        _ => None,
    }
}
