//! The Zombie Pyromancer: fire circles that burn players and heal the boss.

use worldboss_core::constants::*;
use worldboss_core::enums::StatusEffectKind;

use crate::strategy::{AbilityEffect, BehaviorState, BehaviorUpdate, BossView, FireCircle};

/// Drop a new circle at the boss's feet, up to the circle cap.
pub fn fire_circle(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let BehaviorState::Pyromancer { circles } = state else {
        return BehaviorUpdate::unchanged(state);
    };
    if circles.len() >= PYRO_MAX_CIRCLES {
        return BehaviorUpdate::unchanged(state);
    }

    let mut circles = circles.clone();
    circles.push(FireCircle {
        center: view.position,
        expires_at_tick: view.tick + PYRO_CIRCLE_TICKS,
        next_pulse_tick: view.tick + PYRO_CIRCLE_PULSE_TICKS,
    });

    BehaviorUpdate {
        state: BehaviorState::Pyromancer { circles },
        effects: vec![AbilityEffect::Announce {
            radius: ANNOUNCE_RADIUS,
            text: format!("{} summons a circle of fire!", super::name(view.archetype)),
        }],
    }
}

/// Expire old circles and run the burn/heal pulse of each due circle.
pub fn pulse(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let BehaviorState::Pyromancer { circles } = state else {
        return BehaviorUpdate::unchanged(state);
    };
    if circles.is_empty() {
        return BehaviorUpdate::unchanged(state);
    }

    let mut effects = Vec::new();
    let mut kept = Vec::with_capacity(circles.len());

    for circle in circles {
        if view.tick >= circle.expires_at_tick {
            continue;
        }
        let mut circle = *circle;
        if view.tick >= circle.next_pulse_tick {
            circle.next_pulse_tick = view.tick + PYRO_CIRCLE_PULSE_TICKS;
            burn(view, &circle, &mut effects);
        }
        kept.push(circle);
    }

    BehaviorUpdate {
        state: BehaviorState::Pyromancer { circles: kept },
        effects,
    }
}

fn burn(view: &BossView, circle: &FireCircle, effects: &mut Vec<AbilityEffect>) {
    let mut inside = 0u32;
    for player in view.players {
        if player.position.range_to(&circle.center) > PYRO_CIRCLE_RADIUS {
            continue;
        }
        inside += 1;
        effects.push(AbilityEffect::DamagePlayer {
            player: player.id,
            amount: PYRO_FIRE_DAMAGE,
        });
        effects.push(AbilityEffect::ApplyStatus {
            player: player.id,
            kind: StatusEffectKind::Burning,
            amplifier: 0,
            duration_ticks: PYRO_BURN_TICKS,
        });
        effects.push(AbilityEffect::Message {
            player: player.id,
            text: "You are burning in the circle of fire!".into(),
        });
    }

    if inside > 0 {
        let amount = PYRO_HEAL_PER_PLAYER * inside as f64;
        effects.push(AbilityEffect::HealSelf { amount });
        effects.push(AbilityEffect::Announce {
            radius: ANNOUNCE_RADIUS,
            text: format!(
                "{} feeds on the flames! (+{:.0} HP)",
                super::name(view.archetype),
                amount
            ),
        });
    }
}

pub fn bar_status(_view: &BossView, state: &BehaviorState) -> Option<String> {
    match state {
        BehaviorState::Pyromancer { circles } if !circles.is_empty() => {
            Some(format!("[Circles: {}]", circles.len()))
        }
        _ => None,
    }
}
