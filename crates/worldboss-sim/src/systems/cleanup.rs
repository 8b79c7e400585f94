//! Teardown of finished instances and orphaned minions.

use hecs::{Entity, World};

use worldboss_core::components::Minion;
use worldboss_core::events::BossNotification;

use crate::instance::BossInstance;
use crate::registry::BossRegistry;
use crate::systems::perception;

/// Remove the boss entity and its minions, clear the bar and the ledger.
/// Call after rewards have read the ledger.
pub fn teardown(
    world: &mut World,
    instance: &mut BossInstance,
    despawn_buffer: &mut Vec<Entity>,
    notifications: &mut Vec<BossNotification>,
) {
    despawn_buffer.clear();
    despawn_buffer.extend(perception::minions_of(world, instance.id));
    if let Some(entity) = instance.entity.take() {
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }

    notifications.push(BossNotification::HealthBarCleared {
        boss_id: instance.id,
    });
    instance.observers.clear();
    instance.timers.cancel();
    instance.ledger.clear();
}

/// Remove minions whose boss is no longer registered.
pub fn run(world: &mut World, registry: &BossRegistry, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, minion) in world.query_mut::<&Minion>() {
        if !registry.contains(&minion.owner) {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
