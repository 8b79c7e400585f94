//! Simulation constants and tuning parameters.

/// Host simulation tick rate (Hz).
pub const TICK_RATE: u32 = 20;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Convert whole seconds to ticks.
pub const fn secs_to_ticks(secs: u64) -> u64 {
    secs * TICK_RATE as u64
}

// --- Zones ---

/// Zone id of the safe spawn area. Bosses never spawn here.
pub const SAFE_ZONE_ID: u32 = 0;

/// Zone assumed for a location the zone service does not know.
pub const FALLBACK_ZONE_ID: u32 = 1;

// --- Stat scaling ---

/// Health gained per zone level, as a fraction of base health.
pub const HEALTH_PER_ZONE: f64 = 0.15;

/// Damage gained per zone level, as a fraction of base damage.
pub const DAMAGE_PER_ZONE: f64 = 0.05;

/// Flat bonus added to every boss hit on a player, per zone level.
pub const OUTGOING_BONUS_PER_ZONE: f64 = 0.5;

// --- Instance radii ---

/// Players within this radius are alerted on spawn, and are not eligible
/// to anchor another spawn.
pub const ALERT_RADIUS: f64 = 100.0;

/// Players within this radius see the boss health bar.
pub const OBSERVER_RADIUS: f64 = 60.0;

/// Radius within which a player keeps the boss from going idle.
pub const DESPAWN_WATCH_RADIUS: f64 = 50.0;

/// Radius for boss announcements to nearby players.
pub const ANNOUNCE_RADIUS: f64 = 30.0;

/// Radius for the larger announcements (summons, reappearance).
pub const WIDE_ANNOUNCE_RADIUS: f64 = 40.0;

// --- Instance timers ---

/// Observer and health bar refresh cadence.
pub const OBSERVER_REFRESH_TICKS: u64 = secs_to_ticks(1);

/// Despawn watch cadence.
pub const DESPAWN_CHECK_TICKS: u64 = secs_to_ticks(30);

/// Idle duration after which an unobserved boss despawns.
pub const DESPAWN_IDLE_SECS: u64 = 600;

// --- Spawner ---

/// Scheduler check cadence (5 minutes).
pub const SPAWN_CHECK_TICKS: u64 = secs_to_ticks(300);

/// Candidate locations tried around the anchor player.
pub const SPAWN_LOCATION_ATTEMPTS: u32 = 20;

/// Non-solid blocks required above the footing.
pub const BOSS_HEADROOM_BLOCKS: i64 = 3;

// --- Rewards ---

/// Base currency for the top damager at zone 0.
pub const REWARD_BASE_POINTS: u64 = 1000;

/// Extra currency per zone level.
pub const REWARD_POINTS_PER_ZONE: u64 = 50;

/// Luck bonus passed to item generation for boss loot.
pub const LOOT_LUCK_BONUS: f64 = 0.5;

/// Zone levels per extra epic item.
pub const LOOT_ZONES_PER_EXTRA_ITEM: u32 = 15;

/// Cap on extra epic items.
pub const LOOT_MAX_EXTRA_ITEMS: u32 = 2;

/// Bonus consumables dropped on every kill.
pub const LOOT_CONSUMABLES: u32 = 3;

pub const REASON_TOP_DAMAGER: &str = "World Boss - Top Damager";
pub const REASON_PARTICIPATION: &str = "World Boss - Participation";

// --- The Butcher ---

pub const BUTCHER_HOOK_RADIUS: f64 = 15.0;
pub const BUTCHER_HOOK_STRENGTH: f64 = 1.5;
pub const BUTCHER_HOOK_LIFT: f64 = 0.3;
pub const BUTCHER_HOOK_SLOW_TICKS: u64 = 40;
pub const BUTCHER_HOOK_SLOW_AMPLIFIER: u8 = 1;
pub const BUTCHER_ATTACKS_PER_RESISTANCE: u32 = 5;
pub const BUTCHER_MAX_RESISTANCE: u8 = 4;

/// Incoming damage reduction per resistance level.
pub const RESISTANCE_PER_LEVEL: f64 = 0.2;

// --- The Unstable Shadow ---

pub const SHADOW_TARGET_RADIUS: f64 = 30.0;
pub const SHADOW_INVISIBLE_TICKS: u64 = 60;
pub const SHADOW_TELEPORT_DISTANCE: f64 = 2.5;
pub const SHADOW_DARKNESS_TICKS: u64 = 40;
pub const SHADOW_SURPRISE_BASE: f64 = 10.0;
pub const SHADOW_SURPRISE_PER_ZONE: f64 = 0.3;

// --- The Zombie Pyromancer ---

pub const PYRO_CIRCLE_RADIUS: f64 = 6.0;
pub const PYRO_CIRCLE_TICKS: u64 = 200;
pub const PYRO_CIRCLE_PULSE_TICKS: u64 = 10;
pub const PYRO_MAX_CIRCLES: usize = 3;
pub const PYRO_FIRE_DAMAGE: f64 = 5.0;
pub const PYRO_BURN_TICKS: u64 = 40;
pub const PYRO_HEAL_PER_PLAYER: f64 = 20.0;

// --- The Horde Queen ---

/// Health fractions at which a minion wave is summoned.
pub const QUEEN_THRESHOLDS: [f64; 3] = [0.75, 0.50, 0.25];
pub const QUEEN_MINIONS_PER_WAVE: u32 = 5;
pub const QUEEN_MINION_BASE_HEALTH: f64 = 50.0;
pub const QUEEN_MINION_HEALTH_PER_ZONE: f64 = 2.0;
pub const QUEEN_MINION_BASE_DAMAGE: f64 = 8.0;
pub const QUEEN_MINION_DAMAGE_PER_ZONE: f64 = 0.3;
pub const QUEEN_MINION_RING_MIN: f64 = 4.0;
pub const QUEEN_MINION_RING_SPREAD: f64 = 2.0;
/// Chance per tick that the queen's aura pulses over her minions.
pub const QUEEN_AURA_CHANCE: f64 = 0.1;
/// Aura box half extents around the queen.
pub const QUEEN_AURA_HORIZONTAL: f64 = 20.0;
pub const QUEEN_AURA_VERTICAL: f64 = 10.0;
/// Fraction of a minion's max health restored per aura pulse.
pub const QUEEN_AURA_HEAL_FRACTION: f64 = 0.1;
pub const QUEEN_AURA_SPEED_TICKS: u64 = 60;

// --- The Ice Breaker ---

pub const ICE_FREEZE_RADIUS: f64 = 10.0;
pub const ICE_DANGER_RADIUS: f64 = 5.0;
pub const ICE_FREEZE_AMPLIFIER: u8 = 9;
pub const ICE_FREEZE_TICKS: u64 = 80;
pub const ICE_FATIGUE_AMPLIFIER: u8 = 2;
pub const ICE_COLD_DAMAGE: f64 = 3.0;
pub const ICE_CHILL_PERIOD_TICKS: u64 = secs_to_ticks(1);
pub const ICE_DANGER_SLOW_AMPLIFIER: u8 = 3;
pub const ICE_OUTER_SLOW_AMPLIFIER: u8 = 1;
pub const ICE_AURA_SLOW_TICKS: u64 = 40;

// --- Procedural traits ---

pub const TRAIT_PULSE_TICKS: u64 = secs_to_ticks(1);
pub const TRAIT_MIN_COUNT: usize = 1;
pub const TRAIT_MAX_COUNT: usize = 3;
/// Random spread applied to each trait-derived multiplier.
pub const TRAIT_VARIANCE: f64 = 0.15;
pub const REGEN_MIN_PER_SEC: f64 = 2.0;
pub const REGEN_SPREAD_PER_SEC: f64 = 4.0;
pub const LIFESTEAL_MIN: f64 = 0.15;
pub const THORNS_MIN: f64 = 0.15;
pub const LEECH_SPREAD: f64 = 0.15;
/// Below this health fraction a berserker doubles its lifesteal.
pub const BLOOD_FRENZY_FRACTION: f64 = 0.3;
pub const VENOM_TICKS: u64 = 100;
pub const VENOM_AMPLIFIER: u8 = 1;
pub const FROST_AURA_RADIUS: f64 = 5.0;
pub const CURSE_AURA_BASE_RADIUS: f64 = 6.0;
pub const CURSE_AURA_MAX_RADIUS: f64 = 8.0;
pub const BURN_AURA_BASE_RADIUS: f64 = 4.0;
pub const BURN_AURA_MAX_RADIUS: f64 = 6.0;
/// Lightning chance per trait pulse.
pub const STORM_CHANCE: f64 = 0.1;
pub const STORM_RADIUS: f64 = 15.0;
pub const STORM_BASE_DAMAGE: f64 = 5.0;
pub const STORM_DAMAGE_PER_ZONE: f64 = 0.3;
