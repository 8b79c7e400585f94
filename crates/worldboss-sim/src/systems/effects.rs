//! Applies behavior effects to the world and the notification queue.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use worldboss_ai::strategy::AbilityEffect;
use worldboss_core::components::{
    AttackDamage, Health, Invisible, Minion, Resistance, StatusEffect, StatusEffects,
};
use worldboss_core::constants::{QUEEN_MINION_RING_MIN, QUEEN_MINION_RING_SPREAD};
use worldboss_core::enums::StatusEffectKind;
use worldboss_core::events::BossNotification;
use worldboss_core::types::{Position, Velocity};

use crate::instance::BossInstance;
use crate::services::TerrainService;
use crate::systems::perception;

/// Everything effect application needs besides the world and the instance.
pub struct EffectContext<'a> {
    pub tick: u64,
    pub terrain: &'a dyn TerrainService,
    pub rng: &'a mut ChaCha8Rng,
    pub notifications: &'a mut Vec<BossNotification>,
}

pub fn apply(
    world: &mut World,
    instance: &mut BossInstance,
    effects: Vec<AbilityEffect>,
    ctx: &mut EffectContext,
) {
    if effects.is_empty() {
        return;
    }
    let Some(boss) = instance.entity else {
        return;
    };
    let players = perception::player_entities(world);

    for effect in effects {
        match effect {
            AbilityEffect::Launch { player, velocity } => {
                if let Some(&entity) = players.get(&player) {
                    set_velocity(world, entity, velocity);
                }
            }
            AbilityEffect::ApplyStatus {
                player,
                kind,
                amplifier,
                duration_ticks,
            } => {
                if let Some(&entity) = players.get(&player) {
                    add_status(
                        world,
                        entity,
                        StatusEffect {
                            kind,
                            amplifier,
                            expires_at_tick: ctx.tick + duration_ticks,
                        },
                    );
                }
            }
            AbilityEffect::DamagePlayer { player, amount } => {
                if let Some(&entity) = players.get(&player) {
                    if let Ok(mut health) = world.get::<&mut Health>(entity) {
                        health.current = (health.current - amount).max(0.0);
                    }
                }
            }
            AbilityEffect::HealSelf { amount } => {
                if let Ok(mut health) = world.get::<&mut Health>(boss) {
                    health.current = (health.current + amount).min(health.max);
                    instance.health = health.current;
                }
            }
            AbilityEffect::SetInvisible(true) => {
                let _ = world.insert_one(boss, Invisible);
            }
            AbilityEffect::SetInvisible(false) => {
                let _ = world.remove_one::<Invisible>(boss);
            }
            AbilityEffect::Teleport { x, y } => {
                let destination = surface(ctx.terrain, x, y);
                if let Ok(mut pos) = world.get::<&mut Position>(boss) {
                    *pos = destination;
                }
                instance.position = destination;
            }
            AbilityEffect::SummonMinions {
                count,
                health,
                damage,
            } => {
                summon_ring(world, instance, count, health, damage, ctx);
            }
            AbilityEffect::BuffMinions {
                horizontal,
                vertical,
                heal_fraction,
                speed_ticks,
            } => {
                buff_minions(
                    world,
                    instance,
                    (horizontal, vertical),
                    heal_fraction,
                    speed_ticks,
                    ctx.tick,
                );
            }
            AbilityEffect::SetResistance { level } => {
                let _ = world.insert_one(boss, Resistance { level });
            }
            AbilityEffect::Announce { radius, text } => {
                for player in perception::players_near(world, &instance.position, radius, ctx.tick) {
                    ctx.notifications.push(BossNotification::Message {
                        player: player.id,
                        text: text.clone(),
                    });
                }
            }
            AbilityEffect::Message { player, text } => {
                ctx.notifications.push(BossNotification::Message { player, text });
            }
            AbilityEffect::Title {
                player,
                title,
                subtitle,
            } => {
                ctx.notifications.push(BossNotification::Title {
                    player,
                    title,
                    subtitle,
                });
            }
        }
    }
}

fn set_velocity(world: &mut World, entity: Entity, velocity: Velocity) {
    if let Ok(mut vel) = world.get::<&mut Velocity>(entity) {
        *vel = velocity;
        return;
    }
    let _ = world.insert_one(entity, velocity);
}

/// Replace any effect of the same kind.
fn add_status(world: &mut World, entity: Entity, effect: StatusEffect) {
    if let Ok(mut effects) = world.get::<&mut StatusEffects>(entity) {
        effects.effects.retain(|e| e.kind != effect.kind);
        effects.effects.push(effect);
        return;
    }
    let _ = world.insert_one(
        entity,
        StatusEffects {
            effects: vec![effect],
        },
    );
}

/// Standing position on top of the column containing (x, y).
fn surface(terrain: &dyn TerrainService, x: f64, y: f64) -> Position {
    let z = terrain.highest_block(x.floor() as i64, y.floor() as i64) + 1;
    Position::new(x, y, z as f64)
}

fn buff_minions(
    world: &mut World,
    instance: &BossInstance,
    (horizontal, vertical): (f64, f64),
    heal_fraction: f64,
    speed_ticks: u64,
    tick: u64,
) {
    let center = instance.position;
    let in_box: Vec<Entity> = world
        .query::<(&Minion, &Position)>()
        .iter()
        .filter(|(_, (minion, pos))| {
            minion.owner == instance.id
                && (pos.x - center.x).abs() <= horizontal
                && (pos.y - center.y).abs() <= horizontal
                && (pos.z - center.z).abs() <= vertical
        })
        .map(|(entity, _)| entity)
        .collect();

    for &entity in &in_box {
        if let Ok(mut health) = world.get::<&mut Health>(entity) {
            health.current = (health.current + health.max * heal_fraction).min(health.max);
        }
        add_status(
            world,
            entity,
            StatusEffect {
                kind: StatusEffectKind::Speed,
                amplifier: 0,
                expires_at_tick: tick + speed_ticks,
            },
        );
    }
    debug!(boss = %instance.id, buffed = in_box.len(), "Minions buffed");
}

fn summon_ring(
    world: &mut World,
    instance: &BossInstance,
    count: u32,
    health: f64,
    damage: f64,
    ctx: &mut EffectContext,
) {
    let center = DVec2::new(instance.position.x, instance.position.y);
    for i in 0..count {
        let angle = TAU / count as f64 * i as f64;
        let distance = QUEEN_MINION_RING_MIN + ctx.rng.gen::<f64>() * QUEEN_MINION_RING_SPREAD;
        let spot = center + DVec2::from_angle(angle) * distance;
        world.spawn((
            Minion { owner: instance.id },
            surface(ctx.terrain, spot.x, spot.y),
            Health::full(health),
            AttackDamage { value: damage },
        ));
    }
    debug!(boss = %instance.id, count, "Minions summoned");
}
