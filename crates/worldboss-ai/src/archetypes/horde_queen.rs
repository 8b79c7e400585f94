//! The Horde Queen: summons a wave at each health threshold and cannot be
//! hurt while any minion of hers is alive.

use worldboss_core::constants::*;

use crate::strategy::{AbilityEffect, BehaviorState, BehaviorUpdate, BossView, DamageTaken};

pub fn can_receive_damage(state: &BehaviorState) -> bool {
    !matches!(state, BehaviorState::HordeQueen { invincible: true, .. })
}

/// Reject feedback while invincible; otherwise watch the health thresholds.
/// `view.health` is the health after this hit.
pub fn on_damage_received(view: &BossView, state: &BehaviorState, hit: &DamageTaken) -> BehaviorUpdate {
    let BehaviorState::HordeQueen {
        thresholds_triggered,
        invincible,
    } = *state
    else {
        return BehaviorUpdate::unchanged(state);
    };

    if invincible {
        return BehaviorUpdate {
            state: state.clone(),
            effects: vec![AbilityEffect::Message {
                player: hit.attacker,
                text: format!(
                    "{} is INVINCIBLE! Kill her minions first!",
                    super::name(view.archetype)
                ),
            }],
        };
    }

    let fraction = view.health_fraction();
    let Some(wave) = thresholds_triggered
        .iter()
        .zip(QUEEN_THRESHOLDS)
        .position(|(done, threshold)| !done && fraction <= threshold)
    else {
        return BehaviorUpdate::unchanged(state);
    };

    let mut triggered = thresholds_triggered;
    triggered[wave] = true;

    BehaviorUpdate {
        state: BehaviorState::HordeQueen {
            thresholds_triggered: triggered,
            invincible: true,
        },
        effects: summon(view),
    }
}

fn summon(view: &BossView) -> Vec<AbilityEffect> {
    let zone = view.zone as f64;
    let mut effects = vec![AbilityEffect::SummonMinions {
        count: QUEEN_MINIONS_PER_WAVE,
        health: QUEEN_MINION_BASE_HEALTH + zone * QUEEN_MINION_HEALTH_PER_ZONE,
        damage: QUEEN_MINION_BASE_DAMAGE + zone * QUEEN_MINION_DAMAGE_PER_ZONE,
    }];

    for player in view.players_within(WIDE_ANNOUNCE_RADIUS) {
        effects.push(AbilityEffect::Title {
            player: player.id,
            title: "SUMMONING!".into(),
            subtitle: "The Queen calls her horde!".into(),
        });
    }
    effects.push(AbilityEffect::Announce {
        radius: WIDE_ANNOUNCE_RADIUS,
        text: format!(
            "{} summons {} minions!",
            super::name(view.archetype),
            QUEEN_MINIONS_PER_WAVE
        ),
    });
    effects.push(AbilityEffect::Announce {
        radius: WIDE_ANNOUNCE_RADIUS,
        text: "She is INVINCIBLE while her minions live!".into(),
    });
    effects
}

/// Drop invincibility once the last minion is gone; otherwise the aura
/// occasionally heals and hastens the minions around her.
pub fn pulse(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    match *state {
        BehaviorState::HordeQueen {
            thresholds_triggered,
            invincible: true,
        } if view.live_minions == 0 => BehaviorUpdate {
            state: BehaviorState::HordeQueen {
                thresholds_triggered,
                invincible: false,
            },
            effects: vec![AbilityEffect::Announce {
                radius: WIDE_ANNOUNCE_RADIUS,
                text: format!(
                    "All minions are dead! {} is vulnerable!",
                    super::name(view.archetype)
                ),
            }],
        },
        BehaviorState::HordeQueen { .. } if view.live_minions > 0 && view.roll < QUEEN_AURA_CHANCE => {
            BehaviorUpdate {
                state: state.clone(),
                effects: vec![AbilityEffect::BuffMinions {
                    horizontal: QUEEN_AURA_HORIZONTAL,
                    vertical: QUEEN_AURA_VERTICAL,
                    heal_fraction: QUEEN_AURA_HEAL_FRACTION,
                    speed_ticks: QUEEN_AURA_SPEED_TICKS,
                }],
            }
        }
        _ => BehaviorUpdate::unchanged(state),
    }
}

pub fn bar_status(view: &BossView, state: &BehaviorState) -> Option<String> {
    match state {
        BehaviorState::HordeQueen {
            invincible: true, ..
        } => Some(format!("[INVINCIBLE - {} minions]", view.live_minions)),
        _ => None,
    }
}
