//! Reference host: in-memory collaborator services and the combat adapter.
//!
//! Used by the demo binary and the tests. A real server would implement
//! the service traits over its own terrain, zones, and economy.

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dashmap::{DashMap, DashSet};
use hecs::{Entity, World};

use worldboss_core::components::{Heading, Health, Player, Resistance, StatusEffects};
use worldboss_core::constants::{RESISTANCE_PER_LEVEL, SAFE_ZONE_ID};
use worldboss_core::enums::{BlockKind, Rarity};
use worldboss_core::error::ServiceError;
use worldboss_core::types::{LootItem, PlayerId, Position, Velocity, ZoneId};

use crate::router::{CombatEventSink, DamageEvent, DamageVerdict, DeathEvent};
use crate::services::*;

// --- Terrain ---

/// Solid ground up to `ground_z`, air above, with optional water columns.
#[derive(Debug, Default)]
pub struct FlatTerrain {
    pub ground_z: i64,
    water: HashSet<(i64, i64)>,
}

impl FlatTerrain {
    pub fn new(ground_z: i64) -> Self {
        Self {
            ground_z,
            water: HashSet::new(),
        }
    }

    /// The top block of every column in the rectangle becomes water.
    pub fn with_water(mut self, min: (i64, i64), max: (i64, i64)) -> Self {
        for x in min.0..=max.0 {
            for y in min.1..=max.1 {
                self.water.insert((x, y));
            }
        }
        self
    }
}

impl TerrainService for FlatTerrain {
    fn highest_block(&self, _x: i64, _y: i64) -> i64 {
        self.ground_z
    }

    fn block_at(&self, x: i64, y: i64, z: i64) -> BlockKind {
        if z > self.ground_z {
            BlockKind::Air
        } else if z == self.ground_z && self.water.contains(&(x, y)) {
            BlockKind::Liquid
        } else {
            BlockKind::Solid
        }
    }
}

// --- Zones ---

/// Concentric zones around the origin. Zone 0 is the inner safe disc.
#[derive(Debug, Clone)]
pub struct RingZones {
    pub safe_radius: f64,
    pub ring_width: f64,
    pub max_zone: ZoneId,
    pub map_radius: f64,
}

impl Default for RingZones {
    fn default() -> Self {
        Self {
            safe_radius: 100.0,
            ring_width: 200.0,
            max_zone: 50,
            map_radius: 10_000.0,
        }
    }
}

impl ZoneService for RingZones {
    fn zone_at(&self, position: &Position) -> Option<ZoneId> {
        let d = position.horizontal_range_to(&Position::default());
        if d > self.map_radius {
            return None;
        }
        if d <= self.safe_radius {
            return Some(SAFE_ZONE_ID);
        }
        let ring = ((d - self.safe_radius) / self.ring_width) as ZoneId + 1;
        Some(ring.min(self.max_zone))
    }

    fn is_in_map_bounds(&self, position: &Position) -> bool {
        position.horizontal_range_to(&Position::default()) <= self.map_radius
    }
}

/// The same zone everywhere inside square bounds.
#[derive(Debug, Clone)]
pub struct UniformZone {
    pub zone: Option<ZoneId>,
    pub half_extent: f64,
}

impl UniformZone {
    pub fn new(zone: ZoneId) -> Self {
        Self {
            zone: Some(zone),
            half_extent: 10_000.0,
        }
    }
}

impl ZoneService for UniformZone {
    fn zone_at(&self, position: &Position) -> Option<ZoneId> {
        self.is_in_map_bounds(position).then_some(self.zone).flatten()
    }

    fn is_in_map_bounds(&self, position: &Position) -> bool {
        position.x.abs() <= self.half_extent && position.y.abs() <= self.half_extent
    }
}

// --- Refuges ---

#[derive(Debug, Clone, Default)]
pub struct CircleRefuges {
    pub circles: Vec<(Position, f64)>,
}

impl RefugeService for CircleRefuges {
    fn is_protected(&self, position: &Position) -> bool {
        self.circles
            .iter()
            .any(|(center, radius)| center.horizontal_range_to(position) <= *radius)
    }
}

// --- Economy ---

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub player: PlayerId,
    pub amount: u64,
    pub reason: String,
}

/// Keeps balances in memory and logs every grant.
#[derive(Debug, Default)]
pub struct RecordingEconomy {
    balances: DashMap<PlayerId, u64>,
    log: Mutex<Vec<Payment>>,
    failing: DashSet<PlayerId>,
}

impl RecordingEconomy {
    pub fn balance(&self, player: PlayerId) -> u64 {
        self.balances.get(&player).map(|b| *b).unwrap_or(0)
    }

    pub fn payments(&self) -> Vec<Payment> {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }

    /// Make every grant to this player fail.
    pub fn fail_for(&self, player: PlayerId) {
        self.failing.insert(player);
    }
}

impl EconomyService for RecordingEconomy {
    fn add_points(&self, player: PlayerId, amount: u64, reason: &str) -> Result<(), ServiceError> {
        if self.failing.contains(&player) {
            return Err(ServiceError::Unavailable("economy rejected the grant".into()));
        }
        *self.balances.entry(player).or_insert(0) += amount;
        if let Ok(mut log) = self.log.lock() {
            log.push(Payment {
                player,
                amount,
                reason: reason.to_string(),
            });
        }
        Ok(())
    }
}

// --- Items ---

/// Produces numbered items of exactly the requested rarity.
#[derive(Debug, Default)]
pub struct CountingItemGenerator {
    generated: AtomicUsize,
    exhausted: AtomicBool,
}

impl CountingItemGenerator {
    pub fn generated(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }

    /// From now on every roll produces nothing.
    pub fn exhaust(&self) {
        self.exhausted.store(true, Ordering::SeqCst);
    }

    fn next(&self, zone: ZoneId, rarity: Rarity, consumable: bool) -> Option<LootItem> {
        if self.exhausted.load(Ordering::SeqCst) {
            return None;
        }
        let n = self.generated.fetch_add(1, Ordering::SeqCst);
        let kind = if consumable { "Tonic" } else { "Relic" };
        Some(LootItem {
            name: format!("{rarity:?} {kind} #{n}"),
            rarity,
            zone,
            consumable,
        })
    }
}

impl ItemGenerator for CountingItemGenerator {
    fn generate(&self, zone: ZoneId, min_rarity: Rarity, _luck_bonus: f64) -> Option<LootItem> {
        self.next(zone, min_rarity, false)
    }

    fn generate_consumable(&self, zone: ZoneId, _luck_bonus: f64) -> Option<LootItem> {
        self.next(zone, Rarity::Common, true)
    }
}

// --- Assembly ---

/// The reference services plus typed handles to the ones tests inspect.
pub struct ReferenceHost {
    pub services: BossServices,
    pub economy: Arc<RecordingEconomy>,
    pub items: Arc<CountingItemGenerator>,
    pub clock: ManualClock,
}

impl ReferenceHost {
    /// Flat ground at z = 64 and no refuges.
    pub fn new(zones: impl ZoneService + 'static) -> Self {
        Self::with(zones, FlatTerrain::new(64), CircleRefuges::default())
    }

    pub fn with(
        zones: impl ZoneService + 'static,
        terrain: impl TerrainService + 'static,
        refuges: impl RefugeService + 'static,
    ) -> Self {
        let economy = Arc::new(RecordingEconomy::default());
        let items = Arc::new(CountingItemGenerator::default());
        let clock = ManualClock::new(1_000_000);
        let services = BossServices {
            economy: economy.clone(),
            items: items.clone(),
            zones: Arc::new(zones),
            refuges: Arc::new(refuges),
            terrain: Arc::new(terrain),
            clock: Arc::new(clock.clone()),
        };
        Self {
            services,
            economy,
            items,
            clock,
        }
    }
}

pub const PLAYER_MAX_HEALTH: f64 = 20.0;

/// Spawn an online player standing at `position`.
pub fn spawn_player(world: &mut World, name: &str, position: Position) -> (PlayerId, Entity) {
    let id = PlayerId::new();
    let entity = world.spawn((
        Player {
            id,
            name: name.to_string(),
        },
        position,
        Heading::default(),
        Health::full(PLAYER_MAX_HEALTH),
        Velocity::default(),
        StatusEffects::default(),
    ));
    (id, entity)
}

/// Run one hit through the sink the way a host combat pipeline would:
/// resistance first, then the verdict, then health and death handling.
/// Returns the damage actually applied.
pub fn deliver_attack(
    world: &mut World,
    sink: &mut impl CombatEventSink,
    attacker: Entity,
    victim: Entity,
    raw: f64,
) -> f64 {
    let multiplier = world
        .get::<&Resistance>(victim)
        .map(|r| (1.0 - r.level as f64 * RESISTANCE_PER_LEVEL).max(0.0))
        .unwrap_or(1.0);
    let amount = raw * multiplier;
    let lethal = world
        .get::<&Health>(victim)
        .map(|h| h.current - amount <= 0.0)
        .unwrap_or(false);
    let event = DamageEvent {
        attacker,
        victim,
        amount,
        lethal,
    };

    let applied = match sink.on_damage(world, &event) {
        DamageVerdict::Ignore => event.amount,
        DamageVerdict::Allow { amount } => amount,
        DamageVerdict::Cancel => return 0.0,
    };

    let died = match world.get::<&mut Health>(victim) {
        Ok(mut health) => {
            health.current = (health.current - applied).max(0.0);
            health.current <= 0.0
        }
        Err(_) => false,
    };
    if died {
        sink.on_death(
            world,
            &DeathEvent {
                victim,
                killer: Some(attacker),
            },
        );
        if world.get::<&Player>(victim).is_err() {
            let _ = world.despawn(victim);
        }
    }
    applied
}
