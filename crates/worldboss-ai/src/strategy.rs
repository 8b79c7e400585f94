//! Strategy table and the plain data it operates on.
//!
//! No ECS dependency. The simulation builds a [`BossView`] each time a hook
//! runs, calls the archetype's function, stores the returned state back on
//! the instance, and applies the returned effects to the world.

use worldboss_core::enums::{BossArchetype, StatusEffectKind};
use worldboss_core::types::{PlayerId, Position, Velocity, ZoneId};

use crate::archetypes::{butcher, horde_queen, ice_breaker, pyromancer, shadow};

/// A player as seen by a boss.
#[derive(Debug, Clone, Copy)]
pub struct PlayerView {
    pub id: PlayerId,
    pub position: Position,
    /// Facing, radians (0 = North, clockwise).
    pub heading: f64,
    /// Distance to the boss.
    pub distance: f64,
    /// Whether the player currently has slowness of any level.
    pub slowed: bool,
}

/// Input to every strategy function.
#[derive(Debug, Clone, Copy)]
pub struct BossView<'a> {
    pub archetype: BossArchetype,
    pub zone: ZoneId,
    pub tick: u64,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    /// Minions owned by this boss that are still alive.
    pub live_minions: u32,
    /// Online players, nearest first.
    pub players: &'a [PlayerView],
    /// Uniform sample in [0, 1) drawn by the caller for this call.
    pub roll: f64,
}

impl<'a> BossView<'a> {
    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Players within `radius` of the boss.
    pub fn players_within(&self, radius: f64) -> impl Iterator<Item = &'a PlayerView> {
        let players: &'a [PlayerView] = self.players;
        players.iter().filter(move |p| p.distance <= radius)
    }

    pub fn player(&self, id: PlayerId) -> Option<&'a PlayerView> {
        let players: &'a [PlayerView] = self.players;
        players.iter().find(|p| p.id == id)
    }
}

/// One hit the boss took.
#[derive(Debug, Clone, Copy)]
pub struct DamageTaken {
    pub attacker: PlayerId,
    /// Zero when the hit was rejected because the boss cannot be damaged.
    pub amount: f64,
}

/// A live fire circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireCircle {
    pub center: Position,
    pub expires_at_tick: u64,
    pub next_pulse_tick: u64,
}

/// Per-archetype mutable state, stored on the instance record.
#[derive(Debug, Clone, PartialEq)]
pub enum BehaviorState {
    Butcher {
        attacks_landed: u32,
        resistance_level: u8,
    },
    Shadow {
        /// Some while invisible: the tick at which it reappears.
        reappear_at_tick: Option<u64>,
        target: Option<PlayerId>,
    },
    Pyromancer {
        circles: Vec<FireCircle>,
    },
    HordeQueen {
        thresholds_triggered: [bool; 3],
        invincible: bool,
    },
    IceBreaker {
        next_chill_tick: u64,
    },
}

impl BehaviorState {
    /// State for a freshly materialized boss.
    pub fn initial(archetype: BossArchetype, spawn_tick: u64) -> Self {
        match archetype {
            BossArchetype::TheButcher => BehaviorState::Butcher {
                attacks_landed: 0,
                resistance_level: 0,
            },
            BossArchetype::ShadowUnstable => BehaviorState::Shadow {
                reappear_at_tick: None,
                target: None,
            },
            BossArchetype::Pyromancer => BehaviorState::Pyromancer {
                circles: Vec::new(),
            },
            BossArchetype::HordeQueen => BehaviorState::HordeQueen {
                thresholds_triggered: [false; 3],
                invincible: false,
            },
            BossArchetype::IceBreaker => BehaviorState::IceBreaker {
                next_chill_tick: spawn_tick
                    + worldboss_core::constants::ICE_CHILL_PERIOD_TICKS,
            },
        }
    }
}

/// Something the simulation must do to the world.
#[derive(Debug, Clone, PartialEq)]
pub enum AbilityEffect {
    /// Overwrite a player's velocity.
    Launch { player: PlayerId, velocity: Velocity },
    ApplyStatus {
        player: PlayerId,
        kind: StatusEffectKind,
        amplifier: u8,
        duration_ticks: u64,
    },
    DamagePlayer { player: PlayerId, amount: f64 },
    /// Heal the boss, capped at max health.
    HealSelf { amount: f64 },
    SetInvisible(bool),
    /// Move the boss to this column, on the surface.
    Teleport { x: f64, y: f64 },
    SummonMinions { count: u32, health: f64, damage: f64 },
    /// Heal and hasten this boss's minions inside a box around it.
    BuffMinions {
        horizontal: f64,
        vertical: f64,
        heal_fraction: f64,
        speed_ticks: u64,
    },
    SetResistance { level: u8 },
    /// Chat line to every player within `radius` of the boss.
    Announce { radius: f64, text: String },
    Message { player: PlayerId, text: String },
    Title {
        player: PlayerId,
        title: String,
        subtitle: String,
    },
}

/// Result of one strategy call.
#[derive(Debug, Clone, PartialEq)]
pub struct BehaviorUpdate {
    pub state: BehaviorState,
    pub effects: Vec<AbilityEffect>,
}

impl BehaviorUpdate {
    pub fn unchanged(state: &BehaviorState) -> Self {
        Self {
            state: state.clone(),
            effects: Vec::new(),
        }
    }
}

/// The hooks an archetype may override. Missing hooks use the defaults below.
pub struct BossStrategy {
    /// Timer-driven ability.
    pub ability: fn(&BossView, &BehaviorState) -> BehaviorUpdate,
    /// Runs every tick; archetypes gate themselves with next-tick fields.
    pub pulse: fn(&BossView, &BehaviorState) -> BehaviorUpdate,
    pub on_damage_received: fn(&BossView, &BehaviorState, &DamageTaken) -> BehaviorUpdate,
    /// The boss hit a player.
    pub on_attack_landed: fn(&BossView, &BehaviorState, PlayerId) -> BehaviorUpdate,
    pub can_receive_damage: fn(&BehaviorState) -> bool,
    /// Extra health bar text, inserted before the health figures.
    pub bar_status: fn(&BossView, &BehaviorState) -> Option<String>,
}

pub fn no_behavior(_view: &BossView, state: &BehaviorState) -> BehaviorUpdate {
    BehaviorUpdate::unchanged(state)
}

pub fn ignore_damage(_view: &BossView, state: &BehaviorState, _hit: &DamageTaken) -> BehaviorUpdate {
    BehaviorUpdate::unchanged(state)
}

pub fn ignore_attack(_view: &BossView, state: &BehaviorState, _victim: PlayerId) -> BehaviorUpdate {
    BehaviorUpdate::unchanged(state)
}

pub fn always_damageable(_state: &BehaviorState) -> bool {
    true
}

pub fn no_status(_view: &BossView, _state: &BehaviorState) -> Option<String> {
    None
}

static BUTCHER: BossStrategy = BossStrategy {
    ability: butcher::hook,
    pulse: no_behavior,
    on_damage_received: ignore_damage,
    on_attack_landed: butcher::on_attack_landed,
    can_receive_damage: always_damageable,
    bar_status: butcher::bar_status,
};

static SHADOW: BossStrategy = BossStrategy {
    ability: shadow::vanish,
    pulse: shadow::pulse,
    on_damage_received: ignore_damage,
    on_attack_landed: ignore_attack,
    can_receive_damage: always_damageable,
    bar_status: shadow::bar_status,
};

static PYROMANCER: BossStrategy = BossStrategy {
    ability: pyromancer::fire_circle,
    pulse: pyromancer::pulse,
    on_damage_received: ignore_damage,
    on_attack_landed: ignore_attack,
    can_receive_damage: always_damageable,
    bar_status: pyromancer::bar_status,
};

static HORDE_QUEEN: BossStrategy = BossStrategy {
    ability: no_behavior,
    pulse: horde_queen::pulse,
    on_damage_received: horde_queen::on_damage_received,
    on_attack_landed: ignore_attack,
    can_receive_damage: horde_queen::can_receive_damage,
    bar_status: horde_queen::bar_status,
};

static ICE_BREAKER: BossStrategy = BossStrategy {
    ability: ice_breaker::freeze_pulse,
    pulse: ice_breaker::pulse,
    on_damage_received: ignore_damage,
    on_attack_landed: ignore_attack,
    can_receive_damage: always_damageable,
    bar_status: ice_breaker::bar_status,
};

/// Look up the strategy for an archetype.
pub fn strategy_for(archetype: BossArchetype) -> &'static BossStrategy {
    match archetype {
        BossArchetype::TheButcher => &BUTCHER,
        BossArchetype::ShadowUnstable => &SHADOW,
        BossArchetype::Pyromancer => &PYROMANCER,
        BossArchetype::HordeQueen => &HORDE_QUEEN,
        BossArchetype::IceBreaker => &ICE_BREAKER,
    }
}
