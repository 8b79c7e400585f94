//! Read-only world queries used to build behavior views.

use std::collections::HashMap;

use hecs::{Entity, World};

use worldboss_ai::strategy::{BossView, PlayerView};
use worldboss_core::components::{Heading, Minion, Player, StatusEffects};
use worldboss_core::enums::StatusEffectKind;
use worldboss_core::types::{BossId, PlayerId, Position};

use crate::instance::BossInstance;

/// Players within `radius` of `center`, nearest first.
pub fn players_near(world: &World, center: &Position, radius: f64, tick: u64) -> Vec<PlayerView> {
    let mut views: Vec<PlayerView> = world
        .query::<(&Player, &Position, Option<&Heading>, Option<&StatusEffects>)>()
        .iter()
        .filter_map(|(_, (player, pos, heading, effects))| {
            let distance = pos.range_to(center);
            (distance <= radius).then(|| PlayerView {
                id: player.id,
                position: *pos,
                heading: heading.map(|h| h.yaw).unwrap_or(0.0),
                distance,
                slowed: effects.is_some_and(|e| e.has(StatusEffectKind::Slowness, tick)),
            })
        })
        .collect();
    views.sort_by(|a, b| a.distance.total_cmp(&b.distance).then_with(|| a.id.cmp(&b.id)));
    views
}

pub fn any_player_within(world: &World, center: &Position, radius: f64) -> bool {
    world
        .query::<(&Player, &Position)>()
        .iter()
        .any(|(_, (_, pos))| pos.range_to(center) <= radius)
}

/// Entity handle of every online player.
pub fn player_entities(world: &World) -> HashMap<PlayerId, Entity> {
    world
        .query::<&Player>()
        .iter()
        .map(|(entity, player)| (player.id, entity))
        .collect()
}

pub fn minions_of(world: &World, owner: BossId) -> Vec<Entity> {
    world
        .query::<&Minion>()
        .iter()
        .filter(|(_, minion)| minion.owner == owner)
        .map(|(entity, _)| entity)
        .collect()
}

pub fn live_minions(world: &World, owner: BossId) -> u32 {
    minions_of(world, owner).len() as u32
}

/// Snapshot of the instance for one strategy call.
pub fn view<'a>(
    instance: &BossInstance,
    tick: u64,
    players: &'a [PlayerView],
    live_minions: u32,
    roll: f64,
) -> BossView<'a> {
    BossView {
        archetype: instance.archetype,
        zone: instance.zone,
        tick,
        position: instance.position,
        health: instance.health,
        max_health: instance.max_health,
        live_minions,
        players,
        roll,
    }
}
