//! Idle watch.

use hecs::World;

use crate::config::DespawnSettings;
use crate::instance::BossInstance;
use crate::systems::perception;

/// Refresh the last-nearby timestamp, or report that the boss has been
/// alone for longer than the idle limit.
pub fn is_idle(world: &World, instance: &mut BossInstance, now_ms: u64, settings: &DespawnSettings) -> bool {
    if perception::any_player_within(world, &instance.position, settings.watch_radius) {
        instance.last_player_nearby_ms = now_ms;
        return false;
    }
    now_ms.saturating_sub(instance.last_player_nearby_ms) > settings.idle_millis()
}
