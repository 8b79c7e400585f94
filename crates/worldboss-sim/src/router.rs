//! Combat event routing.
//!
//! The host's combat pipeline reports damage, deaths, and target
//! acquisition through [`CombatEventSink`]. Events carry entity handles
//! only; the verdict tells the host what to do with the original event.

use hecs::{Entity, World};
use tracing::debug;

use worldboss_ai::strategy::{strategy_for, DamageTaken};
use worldboss_ai::traits;
use worldboss_core::components::{EffectCloud, Explosive, Player, Projectile};
use worldboss_core::constants::{ALERT_RADIUS, OUTGOING_BONUS_PER_ZONE};
use worldboss_core::enums::DespawnReason;
use worldboss_core::types::{BossId, PlayerId};

use crate::engine::WorldBossService;
use crate::systems;
use crate::systems::effects::EffectContext;

/// A pending hit. `amount` is what the host is about to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub attacker: Entity,
    pub victim: Entity,
    pub amount: f64,
    /// The host expects this hit to kill the victim.
    pub lethal: bool,
}

/// What the host should do with a damage event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageVerdict {
    /// Not a boss event. Apply it unchanged.
    Ignore,
    /// Apply this amount instead of the original.
    Allow { amount: f64 },
    /// Drop the event.
    Cancel,
}

/// An entity died. `killer` is the host's attribution, if any.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEvent {
    pub victim: Entity,
    pub killer: Option<Entity>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetEvent {
    pub attacker: Entity,
    pub target: Entity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetVerdict {
    Allow,
    Veto,
}

pub trait CombatEventSink {
    fn on_damage(&mut self, world: &mut World, event: &DamageEvent) -> DamageVerdict;
    fn on_death(&mut self, world: &mut World, event: &DeathEvent);
    fn on_target(&self, world: &World, event: &TargetEvent) -> TargetVerdict;
}

/// The player ultimately responsible for `source`, looking through
/// projectiles, explosives, and effect clouds.
pub fn resolve_player(world: &World, source: Entity) -> Option<PlayerId> {
    if let Ok(player) = world.get::<&Player>(source) {
        return Some(player.id);
    }
    if let Ok(projectile) = world.get::<&Projectile>(source) {
        return projectile.shooter;
    }
    if let Ok(explosive) = world.get::<&Explosive>(source) {
        return explosive.source;
    }
    if let Ok(cloud) = world.get::<&EffectCloud>(source) {
        return cloud.source;
    }
    None
}

impl CombatEventSink for WorldBossService {
    fn on_damage(&mut self, world: &mut World, event: &DamageEvent) -> DamageVerdict {
        if let Some(boss) = self.registry.id_for_entity(event.attacker) {
            return self.boss_dealt_damage(world, boss, event);
        }
        if let Some(boss) = self.registry.id_for_entity(event.victim) {
            return self.boss_took_damage(world, boss, event);
        }
        DamageVerdict::Ignore
    }

    fn on_death(&mut self, world: &mut World, event: &DeathEvent) {
        let Some(boss) = self.registry.id_for_entity(event.victim) else {
            return;
        };
        let killer = event
            .killer
            .and_then(|k| resolve_player(world, k))
            .or_else(|| {
                self.registry
                    .get(&boss)
                    .and_then(|i| i.ledger.top_damager())
                    .map(|(id, _)| id)
            });

        match killer {
            Some(killer) => {
                self.finish_dead(world, boss, Some(killer));
            }
            None => {
                self.finish_despawn(world, boss, DespawnReason::NoKiller);
            }
        }
    }

    fn on_target(&self, world: &World, event: &TargetEvent) -> TargetVerdict {
        if self.registry.id_for_entity(event.attacker).is_none() {
            return TargetVerdict::Allow;
        }
        if world.get::<&Player>(event.target).is_ok() {
            TargetVerdict::Allow
        } else {
            TargetVerdict::Veto
        }
    }
}

impl WorldBossService {
    /// Boss hit something: add the zone bonus to hits on players and run
    /// the landed-attack hooks. Other victims take the host's amount.
    fn boss_dealt_damage(&mut self, world: &mut World, boss: BossId, event: &DamageEvent) -> DamageVerdict {
        let tick = self.time.tick;
        let Some(victim) = world.get::<&Player>(event.victim).ok().map(|p| p.id) else {
            return DamageVerdict::Ignore;
        };
        let Some(mut guard) = self.registry.get_mut(&boss) else {
            return DamageVerdict::Ignore;
        };
        let instance = &mut *guard;
        if !instance.is_active() {
            return DamageVerdict::Ignore;
        }
        let amount = event.amount + instance.zone as f64 * OUTGOING_BONUS_PER_ZONE;

        let strategy = strategy_for(instance.archetype);
        let players = systems::perception::players_near(world, &instance.position, ALERT_RADIUS, tick);
        let minions = systems::perception::live_minions(world, boss);
        let view = systems::perception::view(instance, tick, &players, minions, 0.0);
        let mut update = (strategy.on_attack_landed)(&view, &instance.behavior, victim);
        update
            .effects
            .extend(traits::on_attack_landed(&instance.modifiers, &view, victim, amount));
        instance.behavior = update.state;
        let mut ctx = EffectContext {
            tick,
            terrain: self.services.terrain.as_ref(),
            rng: &mut self.rng,
            notifications: &mut self.notifications,
        };
        systems::effects::apply(world, instance, update.effects, &mut ctx);

        DamageVerdict::Allow { amount }
    }

    /// Something hit the boss: drop it while the boss is invulnerable,
    /// otherwise attribute it, notify the archetype, and detect the kill.
    fn boss_took_damage(&mut self, world: &mut World, boss: BossId, event: &DamageEvent) -> DamageVerdict {
        let tick = self.time.tick;
        let attacker = resolve_player(world, event.attacker);

        let killer = {
            let Some(mut guard) = self.registry.get_mut(&boss) else {
                return DamageVerdict::Ignore;
            };
            let instance = &mut *guard;
            if !instance.is_active() {
                debug!(boss = %boss, "Dropped hit on inactive boss");
                return DamageVerdict::Ignore;
            }
            instance.sync_from_world(world);

            let strategy = strategy_for(instance.archetype);
            let damageable = (strategy.can_receive_damage)(&instance.behavior);
            // Unattributed hits bypass tracking but never an invulnerable boss.
            let Some(attacker) = attacker else {
                return if damageable {
                    DamageVerdict::Ignore
                } else {
                    DamageVerdict::Cancel
                };
            };

            let hit = DamageTaken {
                attacker,
                amount: if damageable { event.amount } else { 0.0 },
            };
            if damageable {
                instance.record_damage(attacker, event.amount);
                instance.health -= event.amount;
            }

            let players = systems::perception::players_near(world, &instance.position, ALERT_RADIUS, tick);
            let minions = systems::perception::live_minions(world, boss);
            let mut update = (strategy.on_damage_received)(
                &systems::perception::view(instance, tick, &players, minions, 0.0),
                &instance.behavior,
                &hit,
            );
            update
                .effects
                .extend(traits::on_hit_taken(&instance.modifiers, attacker, hit.amount));
            instance.behavior = update.state;
            let mut ctx = EffectContext {
                tick,
                terrain: self.services.terrain.as_ref(),
                rng: &mut self.rng,
                notifications: &mut self.notifications,
            };
            systems::effects::apply(world, instance, update.effects, &mut ctx);

            if !damageable {
                return DamageVerdict::Cancel;
            }
            systems::observers::publish_bar(world, instance, tick, &mut self.notifications);
            (event.lethal || instance.health <= 0.0).then_some(attacker)
        };

        if let Some(killer) = killer {
            self.finish_dead(world, boss, Some(killer));
        }
        DamageVerdict::Allow {
            amount: event.amount,
        }
    }
}
