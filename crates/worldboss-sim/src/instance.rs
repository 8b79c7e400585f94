//! One spawned boss: lifecycle, ledger, timers, and cached stats.

use hecs::{Entity, World};

use worldboss_ai::strategy::BehaviorState;
use worldboss_core::catalog::{get_profile, BossProfile};
use worldboss_core::components::{AttackDamage, BossTag, Glowing, Heading, Health, MoveSpeed, Scale};
use worldboss_core::constants::{secs_to_ticks, TRAIT_PULSE_TICKS};
use worldboss_core::enums::{BossArchetype, LifecycleState};
use worldboss_core::modifiers::BossModifiers;
use worldboss_core::state::BossSummary;
use worldboss_core::types::{BossId, PlayerId, Position, ZoneId};

use crate::ledger::DamageLedger;

/// Next-fire ticks. `None` means the timer is not armed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstanceTimers {
    pub next_ability_tick: Option<u64>,
    pub next_despawn_check_tick: Option<u64>,
    pub next_observer_tick: Option<u64>,
    pub next_trait_tick: Option<u64>,
}

impl InstanceTimers {
    pub fn cancel(&mut self) {
        *self = Self::default();
    }

    pub fn is_cancelled(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug)]
pub struct BossInstance {
    pub id: BossId,
    pub archetype: BossArchetype,
    pub zone: ZoneId,
    state: LifecycleState,
    /// The single world entity owned by this instance.
    pub entity: Option<Entity>,
    pub spawned_at_ms: u64,
    /// Registration order, assigned by the registry.
    pub spawn_seq: u64,
    pub last_player_nearby_ms: u64,
    pub ledger: DamageLedger,
    /// Players currently shown the health bar. Derived, rebuilt each refresh.
    pub observers: Vec<PlayerId>,
    pub timers: InstanceTimers,
    pub behavior: BehaviorState,
    pub modifiers: BossModifiers,
    // Cached from the entity so snapshots never touch the world.
    pub health: f64,
    pub max_health: f64,
    pub position: Position,
}

impl BossInstance {
    /// A pending instance at `position`. Nothing exists in the world yet.
    pub fn new(archetype: BossArchetype, zone: ZoneId, position: Position) -> Self {
        let profile = get_profile(archetype);
        let max_health = profile.health_at(zone);
        Self {
            id: BossId::new(),
            archetype,
            zone,
            state: LifecycleState::Pending,
            entity: None,
            spawned_at_ms: 0,
            spawn_seq: 0,
            last_player_nearby_ms: 0,
            ledger: DamageLedger::new(),
            observers: Vec::new(),
            timers: InstanceTimers::default(),
            behavior: BehaviorState::initial(archetype, 0),
            modifiers: BossModifiers::neutral(),
            health: max_health,
            max_health,
            position,
        }
    }

    /// Replace the neutral modifiers. Only meaningful before materializing.
    pub fn with_modifiers(mut self, modifiers: BossModifiers) -> Self {
        self.max_health = self.profile().health_at(self.zone) * modifiers.health_multiplier;
        self.health = self.max_health;
        self.modifiers = modifiers;
        self
    }

    pub fn profile(&self) -> BossProfile {
        get_profile(self.archetype)
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == LifecycleState::Active
    }

    /// Spawn the entity and arm every timer. PENDING -> ACTIVE.
    ///
    /// Returns `None` if the instance was already materialized.
    pub fn materialize(
        &mut self,
        world: &mut World,
        tick: u64,
        now_ms: u64,
        despawn_check_ticks: u64,
    ) -> Option<Entity> {
        if self.state != LifecycleState::Pending {
            return None;
        }
        let profile = self.profile();

        let entity = world.spawn((
            BossTag {
                boss_id: self.id,
                archetype: self.archetype,
            },
            self.position,
            Health::full(self.max_health),
            AttackDamage {
                value: profile.damage_at(self.zone) * self.modifiers.damage_multiplier,
            },
            Scale {
                factor: profile.scale * self.modifiers.scale_multiplier,
            },
            MoveSpeed {
                factor: self.modifiers.speed_multiplier,
            },
            Glowing,
            Heading::default(),
        ));

        self.entity = Some(entity);
        self.state = LifecycleState::Active;
        self.spawned_at_ms = now_ms;
        self.last_player_nearby_ms = now_ms;
        self.behavior = BehaviorState::initial(self.archetype, tick);
        self.timers = InstanceTimers {
            next_ability_tick: profile
                .is_timer_driven()
                .then(|| tick + self.ability_cooldown_ticks()),
            next_despawn_check_tick: Some(tick + despawn_check_ticks),
            next_observer_tick: Some(tick),
            next_trait_tick: (!self.modifiers.is_neutral()).then_some(tick + TRAIT_PULSE_TICKS),
        };
        Some(entity)
    }

    /// Ticks between ability firings, after the cooldown modifier.
    pub fn ability_cooldown_ticks(&self) -> u64 {
        let base = secs_to_ticks(self.profile().ability_cooldown_secs as u64) as f64;
        ((base * self.modifiers.cooldown_multiplier).round() as u64).max(1)
    }

    /// Generated name if any, else the catalog name.
    pub fn display_name(&self) -> &str {
        match &self.modifiers.name {
            Some(name) => name.display_name.as_str(),
            None => self.profile().display_name,
        }
    }

    pub fn title_name(&self) -> &str {
        match &self.modifiers.name {
            Some(name) => name.title_name.as_str(),
            None => self.profile().title_name,
        }
    }

    /// ACTIVE -> DEAD. Only the first call succeeds.
    pub fn mark_dead(&mut self) -> bool {
        self.leave_active(LifecycleState::Dead)
    }

    /// ACTIVE -> DESPAWNED. Only the first call succeeds.
    pub fn mark_despawned(&mut self) -> bool {
        self.leave_active(LifecycleState::Despawned)
    }

    fn leave_active(&mut self, to: LifecycleState) -> bool {
        if self.state != LifecycleState::Active {
            return false;
        }
        self.state = to;
        self.timers.cancel();
        true
    }

    /// Add to the attacker's ledger entry. Dropped unless ACTIVE.
    pub fn record_damage(&self, attacker: PlayerId, amount: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.ledger.record(attacker, amount);
        true
    }

    /// Copy health and position from the entity. `false` if the entity is gone.
    pub fn sync_from_world(&mut self, world: &World) -> bool {
        let Some(entity) = self.entity else {
            return false;
        };
        let Ok(position) = world.get::<&Position>(entity) else {
            return false;
        };
        self.position = *position;
        if let Ok(health) = world.get::<&Health>(entity) {
            self.health = health.current;
            self.max_health = health.max;
        }
        true
    }

    pub fn health_fraction(&self) -> f64 {
        Health {
            current: self.health,
            max: self.max_health,
        }
        .fraction()
    }

    /// Health bar title, with trait symbols and archetype status before the dash.
    pub fn bar_title(&self, status: Option<&str>) -> String {
        let indicator = self.modifiers.bar_indicator();
        let mut title = self.title_name().to_string();
        for part in [indicator.as_deref(), status].into_iter().flatten() {
            title.push(' ');
            title.push_str(part);
        }
        format!("{} - {:.0}/{:.0}", title, self.health, self.max_health)
    }

    pub fn summary(&self) -> BossSummary {
        BossSummary {
            id: self.id,
            archetype: self.archetype,
            display_name: self.display_name().to_string(),
            zone: self.zone,
            state: self.state,
            health: self.health,
            max_health: self.max_health,
            position: self.position,
        }
    }
}
