//! Observer set and health bar.

use hecs::World;

use worldboss_ai::strategy::strategy_for;
use worldboss_core::components::Glowing;
use worldboss_core::constants::OBSERVER_RADIUS;
use worldboss_core::events::BossNotification;

use crate::instance::BossInstance;
use crate::systems::perception;

/// Rebuild the observer set from current positions, keep the glow on, and
/// publish the bar.
pub fn refresh(
    world: &mut World,
    instance: &mut BossInstance,
    tick: u64,
    notifications: &mut Vec<BossNotification>,
) {
    if let Some(entity) = instance.entity {
        if world.get::<&Glowing>(entity).is_err() {
            let _ = world.insert_one(entity, Glowing);
        }
    }

    let mut viewers: Vec<_> = perception::players_near(world, &instance.position, OBSERVER_RADIUS, tick)
        .into_iter()
        .map(|p| p.id)
        .collect();
    viewers.sort();
    instance.observers = viewers;

    publish_bar(world, instance, tick, notifications);
}

/// Publish the bar to the current observers without recomputing them.
pub fn publish_bar(
    world: &World,
    instance: &BossInstance,
    tick: u64,
    notifications: &mut Vec<BossNotification>,
) {
    let strategy = strategy_for(instance.archetype);
    let minions = perception::live_minions(world, instance.id);
    let status = (strategy.bar_status)(
        &perception::view(instance, tick, &[], minions, 0.0),
        &instance.behavior,
    );

    notifications.push(BossNotification::HealthBar {
        boss_id: instance.id,
        title: instance.bar_title(status.as_deref()),
        progress: instance.health_fraction(),
        viewers: instance.observers.clone(),
    });
}
