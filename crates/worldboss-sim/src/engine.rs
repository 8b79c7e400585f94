//! World boss service: the single entry point the host talks to.
//!
//! `WorldBossService` is constructed explicitly with its collaborators and
//! has no global state. The host calls [`WorldBossService::tick`] once per
//! simulation tick on the thread that owns the world, and feeds combat
//! events through the [`CombatEventSink`](crate::router::CombatEventSink)
//! implementation.

use std::sync::atomic::{AtomicBool, Ordering};

use hecs::{Entity, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use worldboss_ai::procedural;
use worldboss_core::constants::{ALERT_RADIUS, FALLBACK_ZONE_ID, OBSERVER_REFRESH_TICKS};
use worldboss_core::enums::{BossArchetype, DespawnReason};
use worldboss_core::error::BossError;
use worldboss_core::events::BossNotification;
use worldboss_core::state::{BossStats, BossSummary, SchedulerInfo};
use worldboss_core::types::{BossId, PlayerId, Position, SimTime, ZoneId};

use crate::config::WorldBossConfig;
use crate::instance::BossInstance;
use crate::registry::{BossRegistry, SlotReservation};
use crate::rewards::{self, RewardReport};
use crate::scheduler::{self, BossSpawnScheduler};
use crate::services::BossServices;
use crate::systems;
use crate::systems::effects::EffectContext;

pub struct WorldBossService {
    pub(crate) config: WorldBossConfig,
    pub(crate) services: BossServices,
    pub(crate) registry: BossRegistry,
    pub(crate) scheduler: BossSpawnScheduler,
    pub(crate) rng: ChaCha8Rng,
    pub(crate) time: SimTime,
    enabled: AtomicBool,
    started: bool,
    pub(crate) notifications: Vec<BossNotification>,
    reward_reports: Vec<RewardReport>,
    despawn_buffer: Vec<Entity>,
}

impl WorldBossService {
    pub fn new(config: WorldBossConfig, services: BossServices) -> Result<Self, BossError> {
        config.validate()?;
        Ok(Self {
            registry: BossRegistry::new(config.max_concurrent),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            enabled: AtomicBool::new(config.enabled),
            config,
            services,
            scheduler: BossSpawnScheduler::new(),
            time: SimTime::default(),
            started: false,
            notifications: Vec::new(),
            reward_reports: Vec::new(),
            despawn_buffer: Vec::new(),
        })
    }

    /// Begin running. The scheduler only starts if the service is enabled.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        if self.is_enabled() {
            self.start_scheduler();
        } else {
            info!("World boss service started while disabled");
        }
    }

    /// Stop the scheduler and remove every boss.
    pub fn stop(&mut self, world: &mut World) {
        self.scheduler.stop();
        let cleared = self.clear_all(world);
        self.started = false;
        info!(cleared, "World boss service stopped");
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn start_scheduler(&mut self) {
        let now = self.services.now_millis();
        self.scheduler
            .start(self.time.tick, now, &mut self.rng, &self.config);
        info!(
            min_minutes = self.config.spawn.min_interval_minutes,
            max_minutes = self.config.spawn.max_interval_minutes,
            chance = self.config.spawn.chance,
            max_concurrent = self.config.max_concurrent,
            "World boss scheduler running"
        );
    }

    /// Advance one simulation tick.
    pub fn tick(&mut self, world: &mut World) {
        if !self.started {
            return;
        }
        let now = self.services.now_millis();

        if self.is_enabled()
            && self
                .scheduler
                .poll(self.time.tick, now, &mut self.rng, &self.config)
        {
            self.try_spawn(world);
        }

        for id in self.registry.ids() {
            if let Some(reason) = self.run_instance(world, id, now) {
                self.finish_despawn(world, id, reason);
            }
        }

        systems::cleanup::run(world, &self.registry, &mut self.despawn_buffer);
        self.time.advance();
    }

    /// Run every due timer of one instance. Returns a reason when the
    /// instance must be despawned.
    fn run_instance(&mut self, world: &mut World, id: BossId, now_ms: u64) -> Option<DespawnReason> {
        let tick = self.time.tick;
        let mut guard = self.registry.get_mut(&id)?;
        let instance = &mut *guard;
        if !instance.is_active() {
            return None;
        }
        if !instance.sync_from_world(world) {
            warn!(boss = %id, "Boss entity vanished");
            return Some(DespawnReason::EntityLost);
        }

        let mut ctx = EffectContext {
            tick,
            terrain: self.services.terrain.as_ref(),
            rng: &mut self.rng,
            notifications: &mut self.notifications,
        };
        systems::abilities::run(world, instance, &mut ctx);
        systems::abilities::run_traits(world, instance, &mut ctx);

        if is_due(instance.timers.next_observer_tick, tick) {
            instance.timers.next_observer_tick = Some(tick + OBSERVER_REFRESH_TICKS);
            systems::observers::refresh(world, instance, tick, ctx.notifications);
        }

        if is_due(instance.timers.next_despawn_check_tick, tick) {
            instance.timers.next_despawn_check_tick =
                Some(tick + self.config.despawn.check_interval_ticks());
            if systems::despawn::is_idle(world, instance, now_ms, &self.config.despawn) {
                return Some(DespawnReason::Idle);
            }
        }
        None
    }

    // --- Exposed operations ---

    /// Spawn at a location, respecting the concurrency cap.
    pub fn spawn(&mut self, world: &mut World, archetype: BossArchetype, position: Position, zone: ZoneId) -> bool {
        self.spawn_instance(world, archetype, position, zone).is_ok()
    }

    pub fn spawn_instance(
        &mut self,
        world: &mut World,
        archetype: BossArchetype,
        position: Position,
        zone: ZoneId,
    ) -> Result<BossId, BossError> {
        let Some(reservation) = self.registry.reserve() else {
            let max = self.registry.max_concurrent();
            warn!(max, %archetype, "Concurrent boss limit reached");
            return Err(BossError::CapacityReached { max });
        };
        Ok(self.realize(world, reservation, archetype, position, zone))
    }

    /// Spawn at a location, ignoring the cap. The zone comes from the zone service.
    pub fn force_spawn(&mut self, world: &mut World, archetype: BossArchetype, position: Position) -> bool {
        self.force_spawn_instance(world, archetype, position).is_ok()
    }

    /// Fails only when `position` is outside the map.
    pub fn force_spawn_instance(
        &mut self,
        world: &mut World,
        archetype: BossArchetype,
        position: Position,
    ) -> Result<BossId, BossError> {
        if !self.services.zones.is_in_map_bounds(&position) {
            warn!(%archetype, %position, "Forced spawn outside the map");
            return Err(BossError::OutsideMap(position));
        }
        let zone = self
            .services
            .zones
            .zone_at(&position)
            .unwrap_or(FALLBACK_ZONE_ID);
        let reservation = self.registry.reserve_forced();
        Ok(self.realize(world, reservation, archetype, position, zone))
    }

    /// One immediate scheduler attempt.
    pub fn try_spawn(&mut self, world: &mut World) -> bool {
        if !self.is_enabled() {
            debug!("Spawn attempt skipped: disabled");
            return false;
        }
        match scheduler::propose(world, &self.registry, &self.services, &mut self.rng, &self.config) {
            Ok(proposal) => self.spawn(world, proposal.archetype, proposal.position, proposal.zone),
            Err(reason) => {
                debug!(?reason, "Spawn attempt skipped");
                false
            }
        }
    }

    fn realize(
        &mut self,
        world: &mut World,
        reservation: SlotReservation,
        archetype: BossArchetype,
        position: Position,
        zone: ZoneId,
    ) -> BossId {
        let tick = self.time.tick;
        let mut instance = BossInstance::new(archetype, zone, position);
        if self.config.modifiers.enabled {
            instance = instance.with_modifiers(procedural::generate(archetype, self.rng.gen()));
        }
        let entity = instance.materialize(
            world,
            tick,
            self.services.now_millis(),
            self.config.despawn.check_interval_ticks(),
        );
        let id = instance.id;
        let profile = instance.profile();

        for player in systems::perception::players_near(world, &position, ALERT_RADIUS, tick) {
            self.notifications.push(BossNotification::SpawnAlert {
                player: player.id,
                boss_id: id,
                title_name: instance.title_name().to_string(),
                ability: profile.ability_description.to_string(),
            });
        }

        info!(
            boss = %id,
            %archetype,
            name = instance.display_name(),
            zone,
            %position,
            health = instance.max_health,
            traits = %instance.modifiers.traits_description(),
            ?entity,
            "World boss spawned"
        );
        self.registry.insert(reservation, instance);
        id
    }

    pub fn list_active(&self) -> Vec<BossSummary> {
        self.registry.list_active()
    }

    /// Remove every boss without rewards. Returns how many were removed.
    pub fn clear_all(&mut self, world: &mut World) -> usize {
        self.registry
            .ids()
            .into_iter()
            .filter(|id| self.finish_despawn(world, *id, DespawnReason::Cleared))
            .count()
    }

    pub fn stats(&self) -> BossStats {
        self.registry.stats()
    }

    /// Enabling starts the scheduler; disabling stops it and clears all bosses.
    pub fn set_enabled(&mut self, world: &mut World, enabled: bool) {
        self.enabled.store(enabled, Ordering::SeqCst);
        if enabled {
            if self.started && !self.scheduler.is_running() {
                self.start_scheduler();
            }
        } else {
            self.scheduler.stop();
            let cleared = self.clear_all(world);
            info!(cleared, "World boss system disabled");
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// Make the next tick run a spawn attempt regardless of the interval.
    pub fn force_check(&mut self) {
        let now = self.services.now_millis();
        self.scheduler.force_check(self.time.tick, now);
    }

    pub fn scheduler_info(&self) -> SchedulerInfo {
        self.scheduler.info(self.services.now_millis())
    }

    pub fn debug_info(&self) -> String {
        self.scheduler.debug_info(self.services.now_millis())
    }

    pub fn drain_notifications(&mut self) -> Vec<BossNotification> {
        std::mem::take(&mut self.notifications)
    }

    /// Reports for every kill since the last call.
    pub fn drain_reward_reports(&mut self) -> Vec<RewardReport> {
        std::mem::take(&mut self.reward_reports)
    }

    /// Read handle, safe to move to other threads.
    pub fn registry(&self) -> BossRegistry {
        self.registry.clone()
    }

    pub fn config(&self) -> &WorldBossConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    // --- Terminal transitions ---

    /// ACTIVE -> DEAD, then rewards and teardown. `None` if the instance
    /// was not active.
    pub(crate) fn finish_dead(
        &mut self,
        world: &mut World,
        id: BossId,
        killer: Option<PlayerId>,
    ) -> Option<RewardReport> {
        let marked = self
            .registry
            .get_mut(&id)
            .map(|mut instance| {
                let first = instance.mark_dead();
                if first {
                    instance.sync_from_world(world);
                }
                first
            })
            .unwrap_or(false);
        if !marked {
            return None;
        }

        let mut instance = self.registry.remove(&id)?;
        let report = rewards::distribute(world, &instance, killer, &self.services, &mut self.notifications);
        info!(
            boss = %id,
            archetype = %instance.archetype,
            zone = instance.zone,
            top_damager = ?report.top_damager,
            participants = instance.ledger.len(),
            loot = report.loot.len(),
            "World boss killed"
        );
        systems::cleanup::teardown(world, &mut instance, &mut self.despawn_buffer, &mut self.notifications);
        self.reward_reports.push(report.clone());
        Some(report)
    }

    /// ACTIVE -> DESPAWNED and teardown, without rewards.
    pub(crate) fn finish_despawn(&mut self, world: &mut World, id: BossId, reason: DespawnReason) -> bool {
        let marked = self
            .registry
            .get_mut(&id)
            .map(|mut instance| instance.mark_despawned())
            .unwrap_or(false);
        if !marked {
            return false;
        }
        let Some(mut instance) = self.registry.remove(&id) else {
            return false;
        };
        info!(boss = %id, archetype = %instance.archetype, %reason, "World boss despawned");
        systems::cleanup::teardown(world, &mut instance, &mut self.despawn_buffer, &mut self.notifications);
        true
    }
}

fn is_due(next: Option<u64>, tick: u64) -> bool {
    next.is_some_and(|t| tick >= t)
}
