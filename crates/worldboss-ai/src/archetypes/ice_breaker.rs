//! The Ice Breaker: periodic freeze pulse plus a permanent chilling aura.

use worldboss_core::constants::*;
use worldboss_core::enums::StatusEffectKind;

use crate::strategy::{AbilityEffect, BehaviorState, BehaviorUpdate, BossView};

/// Freeze everyone in the freeze radius.
pub fn freeze_pulse(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let mut effects = Vec::new();

    for player in view.players_within(ICE_FREEZE_RADIUS) {
        effects.push(AbilityEffect::ApplyStatus {
            player: player.id,
            kind: StatusEffectKind::Slowness,
            amplifier: ICE_FREEZE_AMPLIFIER,
            duration_ticks: ICE_FREEZE_TICKS,
        });
        effects.push(AbilityEffect::ApplyStatus {
            player: player.id,
            kind: StatusEffectKind::MiningFatigue,
            amplifier: ICE_FATIGUE_AMPLIFIER,
            duration_ticks: ICE_FREEZE_TICKS,
        });
        effects.push(AbilityEffect::Message {
            player: player.id,
            text: "You are frozen! Get away from the boss!".into(),
        });
    }

    effects.push(AbilityEffect::Announce {
        radius: ANNOUNCE_RADIUS,
        text: format!(
            "{} releases a wave of intense cold!",
            super::name(view.archetype)
        ),
    });

    BehaviorUpdate {
        state: state.clone(),
        effects,
    }
}

/// Once per second: cold damage close in, lighter slowness further out.
pub fn pulse(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let BehaviorState::IceBreaker { next_chill_tick } = *state else {
        return BehaviorUpdate::unchanged(state);
    };
    if view.tick < next_chill_tick {
        return BehaviorUpdate::unchanged(state);
    }

    let mut effects = Vec::new();
    for player in view.players_within(ICE_FREEZE_RADIUS) {
        let amplifier = if player.distance <= ICE_DANGER_RADIUS {
            let damage = ICE_COLD_DAMAGE * (1.0 - player.distance / ICE_DANGER_RADIUS);
            if damage > 0.0 {
                effects.push(AbilityEffect::DamagePlayer {
                    player: player.id,
                    amount: damage,
                });
            }
            ICE_DANGER_SLOW_AMPLIFIER
        } else {
            ICE_OUTER_SLOW_AMPLIFIER
        };

        if !player.slowed {
            effects.push(AbilityEffect::ApplyStatus {
                player: player.id,
                kind: StatusEffectKind::Slowness,
                amplifier,
                duration_ticks: ICE_AURA_SLOW_TICKS,
            });
        }
    }

    BehaviorUpdate {
        state: BehaviorState::IceBreaker {
            next_chill_tick: view.tick + ICE_CHILL_PERIOD_TICKS,
        },
        effects,
    }
}

pub fn bar_status(_view: &BossView, _state: &BehaviorState) -> Option<String> {
    Some("[Freeze zone active]".into())
}
