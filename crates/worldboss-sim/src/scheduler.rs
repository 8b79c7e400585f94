//! Spawn scheduling: randomized intervals, eligibility, and location search.

use std::f64::consts::TAU;

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use worldboss_core::components::Player;
use worldboss_core::constants::*;
use worldboss_core::enums::BossArchetype;
use worldboss_core::state::SchedulerInfo;
use worldboss_core::types::{PlayerId, Position, ZoneId};

use crate::config::WorldBossConfig;
use crate::registry::BossRegistry;
use crate::services::BossServices;

/// What the scheduler wants spawned, and where.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnProposal {
    pub archetype: BossArchetype,
    pub position: Position,
    pub zone: ZoneId,
}

/// Why an attempt produced no proposal. Never surfaced to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSkip {
    AtCapacity,
    ChanceRoll,
    NoEligiblePlayers,
    NoLocation,
}

/// Check cadence and the wall-clock gate between attempts.
#[derive(Debug, Clone, Default)]
pub struct BossSpawnScheduler {
    running: bool,
    next_check_tick: u64,
    next_attempt_at_ms: u64,
    last_attempt_ms: Option<u64>,
}

impl BossSpawnScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, tick: u64, now_ms: u64, rng: &mut ChaCha8Rng, config: &WorldBossConfig) {
        self.running = true;
        self.next_check_tick = tick + config.spawn.check_interval_ticks();
        self.next_attempt_at_ms = now_ms + next_interval_ms(rng, config);
        debug!(
            in_minutes = (self.next_attempt_at_ms - now_ms) / 60_000,
            "Spawn scheduler started"
        );
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance one tick. Returns `true` when a check fires and the interval
    /// has elapsed, i.e. the caller should make one spawn attempt now.
    pub fn poll(&mut self, tick: u64, now_ms: u64, rng: &mut ChaCha8Rng, config: &WorldBossConfig) -> bool {
        if !self.running || tick < self.next_check_tick {
            return false;
        }
        self.next_check_tick = tick + config.spawn.check_interval_ticks();

        if now_ms < self.next_attempt_at_ms {
            debug!(
                remaining_secs = (self.next_attempt_at_ms - now_ms) / 1000,
                "Spawn check: interval not yet elapsed"
            );
            return false;
        }

        self.last_attempt_ms = Some(now_ms);
        self.next_attempt_at_ms = now_ms + next_interval_ms(rng, config);
        true
    }

    /// Make the next tick's check go ahead regardless of the interval.
    pub fn force_check(&mut self, tick: u64, now_ms: u64) {
        self.next_check_tick = tick;
        self.next_attempt_at_ms = now_ms;
    }

    pub fn info(&self, now_ms: u64) -> SchedulerInfo {
        SchedulerInfo {
            until_next_attempt_ms: self.next_attempt_at_ms.saturating_sub(now_ms),
            since_last_attempt_ms: self.last_attempt_ms.map(|t| now_ms.saturating_sub(t)),
        }
    }

    pub fn debug_info(&self, now_ms: u64) -> String {
        self.info(now_ms).to_string()
    }
}

/// Uniform whole minutes in [min, max), as milliseconds.
pub fn next_interval_ms(rng: &mut ChaCha8Rng, config: &WorldBossConfig) -> u64 {
    let min = config.spawn.min_interval_minutes;
    let max = config.spawn.max_interval_minutes;
    let minutes = if max > min { rng.gen_range(min..max) } else { min };
    minutes * 60_000
}

/// One full spawn attempt, short of materializing the boss.
pub fn propose(
    world: &World,
    registry: &BossRegistry,
    services: &BossServices,
    rng: &mut ChaCha8Rng,
    config: &WorldBossConfig,
) -> Result<SpawnProposal, SpawnSkip> {
    if registry.is_at_capacity() {
        return Err(SpawnSkip::AtCapacity);
    }
    if rng.gen::<f64>() >= config.spawn.chance {
        return Err(SpawnSkip::ChanceRoll);
    }

    let pool = eligible_players(world, registry, services);
    if pool.is_empty() {
        return Err(SpawnSkip::NoEligiblePlayers);
    }
    let (anchor_id, anchor) = pool[rng.gen_range(0..pool.len())];

    let position = find_spawn_location(&anchor, services, rng, config).ok_or(SpawnSkip::NoLocation)?;
    let archetype = BossArchetype::ALL[rng.gen_range(0..BossArchetype::ALL.len())];
    let zone = services.zones.zone_at(&position).unwrap_or(FALLBACK_ZONE_ID);

    debug!(%anchor_id, %archetype, zone, %position, "Spawn proposal");
    Ok(SpawnProposal {
        archetype,
        position,
        zone,
    })
}

/// Online players a boss may appear next to, ordered by id.
pub fn eligible_players(
    world: &World,
    registry: &BossRegistry,
    services: &BossServices,
) -> Vec<(PlayerId, Position)> {
    let mut pool: Vec<_> = world
        .query::<(&Player, &Position)>()
        .iter()
        .map(|(_, (player, pos))| (player.id, *pos))
        .filter(|(_, pos)| {
            services.zones.zone_at(pos) != Some(SAFE_ZONE_ID)
                && !services.refuges.is_protected(pos)
                && !registry.any_active_within(pos, ALERT_RADIUS)
        })
        .collect();
    pool.sort_by_key(|(id, _)| *id);
    pool
}

/// Try a fixed number of random candidates around `anchor`.
pub fn find_spawn_location(
    anchor: &Position,
    services: &BossServices,
    rng: &mut ChaCha8Rng,
    config: &WorldBossConfig,
) -> Option<Position> {
    let min = config.spawn.min_radius;
    let max = config.spawn.max_radius;

    for _ in 0..SPAWN_LOCATION_ATTEMPTS {
        let angle = rng.gen::<f64>() * TAU;
        let distance = min + rng.gen::<f64>() * (max - min);
        let offset = DVec2::from_angle(angle) * distance;
        let x = anchor.x + offset.x;
        let y = anchor.y + offset.y;

        let z = services.terrain.highest_block(x.floor() as i64, y.floor() as i64) + 1;
        let candidate = Position::new(x, y, z as f64);
        if is_valid_spawn_location(&candidate, services) {
            return Some(candidate);
        }
    }
    None
}

pub fn is_valid_spawn_location(position: &Position, services: &BossServices) -> bool {
    if !services.zones.is_in_map_bounds(position) {
        return false;
    }

    let terrain = &services.terrain;
    let (x, y) = position.block_column();
    let z = position.z.floor() as i64;

    let ground = terrain.block_at(x, y, z - 1);
    if !ground.is_solid() {
        return false;
    }
    if (0..BOSS_HEADROOM_BLOCKS).any(|dz| terrain.block_at(x, y, z + dz).is_solid()) {
        return false;
    }
    if services.zones.zone_at(position) == Some(SAFE_ZONE_ID) {
        return false;
    }
    if services.refuges.is_protected(position) {
        return false;
    }
    !(ground.is_liquid() || terrain.block_at(x, y, z).is_liquid())
}
