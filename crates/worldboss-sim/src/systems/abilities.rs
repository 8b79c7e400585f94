//! Behavior system: per-tick pulse, the timer-driven ability, and the
//! once-per-second trait pulse.

use hecs::World;
use rand::Rng;
use tracing::debug;

use worldboss_ai::strategy::strategy_for;
use worldboss_ai::traits;
use worldboss_core::constants::{ALERT_RADIUS, TRAIT_PULSE_TICKS};

use crate::instance::BossInstance;
use crate::systems::effects::{self, EffectContext};
use crate::systems::perception;

pub fn run(world: &mut World, instance: &mut BossInstance, ctx: &mut EffectContext) {
    let strategy = strategy_for(instance.archetype);

    let players = perception::players_near(world, &instance.position, ALERT_RADIUS, ctx.tick);
    let minions = perception::live_minions(world, instance.id);
    let roll = ctx.rng.gen::<f64>();
    let update = (strategy.pulse)(
        &perception::view(instance, ctx.tick, &players, minions, roll),
        &instance.behavior,
    );
    instance.behavior = update.state;
    effects::apply(world, instance, update.effects, ctx);

    let Some(due) = instance.timers.next_ability_tick else {
        return;
    };
    if ctx.tick < due {
        return;
    }
    let cooldown = instance.ability_cooldown_ticks();
    instance.timers.next_ability_tick = Some(ctx.tick + cooldown);

    let players = perception::players_near(world, &instance.position, ALERT_RADIUS, ctx.tick);
    let roll = ctx.rng.gen::<f64>();
    let update = (strategy.ability)(
        &perception::view(instance, ctx.tick, &players, minions, roll),
        &instance.behavior,
    );
    debug!(
        boss = %instance.id,
        archetype = %instance.archetype,
        effects = update.effects.len(),
        "Ability fired"
    );
    instance.behavior = update.state;
    effects::apply(world, instance, update.effects, ctx);
}

/// Procedural trait effects, on their own one-second timer.
pub fn run_traits(world: &mut World, instance: &mut BossInstance, ctx: &mut EffectContext) {
    let Some(due) = instance.timers.next_trait_tick else {
        return;
    };
    if ctx.tick < due {
        return;
    }
    instance.timers.next_trait_tick = Some(ctx.tick + TRAIT_PULSE_TICKS);

    let players = perception::players_near(world, &instance.position, ALERT_RADIUS, ctx.tick);
    let minions = perception::live_minions(world, instance.id);
    let roll = ctx.rng.gen::<f64>();
    let effects = traits::pulse(
        &instance.modifiers,
        &perception::view(instance, ctx.tick, &players, minions, roll),
    );
    effects::apply(world, instance, effects, ctx);
}
