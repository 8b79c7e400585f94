//! The Unstable Shadow: vanishes, then strikes from behind a chosen player.

use glam::DVec2;

use worldboss_core::constants::*;
use worldboss_core::enums::StatusEffectKind;

use crate::strategy::{AbilityEffect, BehaviorState, BehaviorUpdate, BossView};

/// Turn invisible and mark a random nearby player as the target.
pub fn vanish(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let BehaviorState::Shadow {
        reappear_at_tick: None,
        ..
    } = state
    else {
        // Already invisible, or not a shadow.
        return BehaviorUpdate::unchanged(state);
    };

    let candidates: Vec<_> = view.players_within(SHADOW_TARGET_RADIUS).collect();
    if candidates.is_empty() {
        return BehaviorUpdate::unchanged(state);
    }
    let index = ((view.roll * candidates.len() as f64) as usize).min(candidates.len() - 1);
    let target = candidates[index].id;

    BehaviorUpdate {
        state: BehaviorState::Shadow {
            reappear_at_tick: Some(view.tick + SHADOW_INVISIBLE_TICKS),
            target: Some(target),
        },
        effects: vec![
            AbilityEffect::SetInvisible(true),
            AbilityEffect::Announce {
                radius: WIDE_ANNOUNCE_RADIUS,
                text: format!("{} fades into the shadows...", super::name(view.archetype)),
            },
        ],
    }
}

/// Reappear once the invisibility window ends.
pub fn pulse(view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    let BehaviorState::Shadow {
        reappear_at_tick: Some(at),
        target,
    } = *state
    else {
        return BehaviorUpdate::unchanged(state);
    };
    if view.tick < at {
        return BehaviorUpdate::unchanged(state);
    }

    let mut effects = vec![AbilityEffect::SetInvisible(false)];

    // A target that logged off leaves the shadow where it is.
    if let Some(player) = target.and_then(|id| view.player(id)) {
        let facing = DVec2::new(player.heading.sin(), player.heading.cos());
        let behind = DVec2::new(player.position.x, player.position.y) - facing * SHADOW_TELEPORT_DISTANCE;
        effects.push(AbilityEffect::Teleport {
            x: behind.x,
            y: behind.y,
        });
        effects.push(AbilityEffect::Title {
            player: player.id,
            title: "BEHIND YOU!".into(),
            subtitle: String::new(),
        });
        effects.push(AbilityEffect::ApplyStatus {
            player: player.id,
            kind: StatusEffectKind::Darkness,
            amplifier: 0,
            duration_ticks: SHADOW_DARKNESS_TICKS,
        });
        effects.push(AbilityEffect::DamagePlayer {
            player: player.id,
            amount: SHADOW_SURPRISE_BASE + view.zone as f64 * SHADOW_SURPRISE_PER_ZONE,
        });
    }

    effects.push(AbilityEffect::Announce {
        radius: WIDE_ANNOUNCE_RADIUS,
        text: format!("{} reappears!", super::name(view.archetype)),
    });

    BehaviorUpdate {
        state: BehaviorState::Shadow {
            reappear_at_tick: None,
            target: None,
        },
        effects,
    }
}

pub fn bar_status(_view: &BossView, state: &BehaviorState) -> Option<String> {
    match state {
        BehaviorState::Shadow {
            reappear_at_tick: Some(_),
            ..
        } => Some("[INVISIBLE]".into()),
        _ => None,
    }
}
