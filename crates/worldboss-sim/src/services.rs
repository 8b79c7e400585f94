//! Collaborator services the subsystem consumes.
//!
//! The host provides one implementation of each trait. They are injected as
//! `Arc<dyn ...>` and bundled into [`BossServices`] at construction.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use worldboss_core::enums::{BlockKind, Rarity};
use worldboss_core::error::ServiceError;
use worldboss_core::types::{LootItem, PlayerId, Position, ZoneId};

/// Player currency.
pub trait EconomyService: Send + Sync {
    fn add_points(&self, player: PlayerId, amount: u64, reason: &str) -> Result<(), ServiceError>;
}

/// Loot generation.
pub trait ItemGenerator: Send + Sync {
    /// An item of at least `min_rarity`, or `None` if nothing could be rolled.
    fn generate(&self, zone: ZoneId, min_rarity: Rarity, luck_bonus: f64) -> Option<LootItem>;

    fn generate_consumable(&self, zone: ZoneId, luck_bonus: f64) -> Option<LootItem>;
}

/// Zone lookup and map bounds.
pub trait ZoneService: Send + Sync {
    fn zone_at(&self, position: &Position) -> Option<ZoneId>;
    fn is_in_map_bounds(&self, position: &Position) -> bool;
}

/// Refuges and other protected areas.
pub trait RefugeService: Send + Sync {
    fn is_protected(&self, position: &Position) -> bool;
}

/// Block queries used by spawn-location checks.
pub trait TerrainService: Send + Sync {
    /// Height of the highest non-air block in the column.
    fn highest_block(&self, x: i64, y: i64) -> i64;
    fn block_at(&self, x: i64, y: i64, z: i64) -> BlockKind;
}

/// Wall-clock source for idle timeouts and the spawn interval.
pub trait WallClock: Send + Sync {
    fn now_millis(&self) -> u64;
}

/// Real time since the Unix epoch.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl WallClock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

/// A clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    millis: Arc<AtomicU64>,
}

impl ManualClock {
    pub fn new(start_millis: u64) -> Self {
        Self {
            millis: Arc::new(AtomicU64::new(start_millis)),
        }
    }

    pub fn advance(&self, millis: u64) {
        self.millis.fetch_add(millis, Ordering::SeqCst);
    }

    pub fn advance_secs(&self, secs: u64) {
        self.advance(secs * 1000);
    }

    pub fn set(&self, millis: u64) {
        self.millis.store(millis, Ordering::SeqCst);
    }
}

impl WallClock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.millis.load(Ordering::SeqCst)
    }
}

/// Every collaborator the service needs.
#[derive(Clone)]
pub struct BossServices {
    pub economy: Arc<dyn EconomyService>,
    pub items: Arc<dyn ItemGenerator>,
    pub zones: Arc<dyn ZoneService>,
    pub refuges: Arc<dyn RefugeService>,
    pub terrain: Arc<dyn TerrainService>,
    pub clock: Arc<dyn WallClock>,
}

impl BossServices {
    pub fn now_millis(&self) -> u64 {
        self.clock.now_millis()
    }
}
