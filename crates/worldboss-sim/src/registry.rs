//! Registry of live boss instances.
//!
//! Cloning the registry clones a handle; all clones see the same instances.
//! Mutation happens on the simulation thread. Other threads may read
//! summaries and counters at any time.
//!
//! Never hold a guard returned by [`BossRegistry::get`] or
//! [`BossRegistry::get_mut`] across another call into the registry.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use dashmap::mapref::one::{Ref, RefMut};
use dashmap::DashMap;
use hecs::Entity;
use tracing::warn;

use worldboss_core::enums::LifecycleState;
use worldboss_core::state::{BossStats, BossSummary};
use worldboss_core::types::{BossId, Position};

use crate::instance::BossInstance;

#[derive(Debug)]
struct RegistryInner {
    instances: DashMap<BossId, BossInstance>,
    by_entity: DashMap<Entity, BossId>,
    /// Registered instances plus outstanding reservations.
    occupied: AtomicUsize,
    max_concurrent: usize,
    spawned: AtomicU64,
    killed: AtomicU64,
    despawned: AtomicU64,
}

#[derive(Debug, Clone)]
pub struct BossRegistry {
    inner: Arc<RegistryInner>,
}

/// A held capacity slot. Released on drop unless consumed by
/// [`BossRegistry::insert`].
#[derive(Debug)]
pub struct SlotReservation {
    registry: BossRegistry,
    committed: bool,
}

impl Drop for SlotReservation {
    fn drop(&mut self) {
        if !self.committed {
            self.registry.inner.occupied.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl BossRegistry {
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                instances: DashMap::new(),
                by_entity: DashMap::new(),
                occupied: AtomicUsize::new(0),
                max_concurrent,
                spawned: AtomicU64::new(0),
                killed: AtomicU64::new(0),
                despawned: AtomicU64::new(0),
            }),
        }
    }

    pub fn max_concurrent(&self) -> usize {
        self.inner.max_concurrent
    }

    /// Take one slot if the cap allows it.
    pub fn reserve(&self) -> Option<SlotReservation> {
        let max = self.inner.max_concurrent;
        self.inner
            .occupied
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| (n < max).then_some(n + 1))
            .ok()
            .map(|_| SlotReservation {
                registry: self.clone(),
                committed: false,
            })
    }

    /// Take a slot regardless of the cap.
    pub fn reserve_forced(&self) -> SlotReservation {
        self.inner.occupied.fetch_add(1, Ordering::SeqCst);
        SlotReservation {
            registry: self.clone(),
            committed: false,
        }
    }

    pub fn is_at_capacity(&self) -> bool {
        self.inner.occupied.load(Ordering::SeqCst) >= self.inner.max_concurrent
    }

    /// Register a materialized instance, consuming its reservation.
    pub fn insert(&self, mut reservation: SlotReservation, mut instance: BossInstance) {
        instance.spawn_seq = self.inner.spawned.fetch_add(1, Ordering::SeqCst);
        if let Some(entity) = instance.entity {
            self.inner.by_entity.insert(entity, instance.id);
        }
        self.inner.instances.insert(instance.id, instance);
        reservation.committed = true;
    }

    pub fn get(&self, id: &BossId) -> Option<Ref<'_, BossId, BossInstance>> {
        self.inner.instances.get(id)
    }

    pub fn get_mut(&self, id: &BossId) -> Option<RefMut<'_, BossId, BossInstance>> {
        self.inner.instances.get_mut(id)
    }

    pub fn id_for_entity(&self, entity: Entity) -> Option<BossId> {
        self.inner.by_entity.get(&entity).map(|id| *id)
    }

    pub fn contains(&self, id: &BossId) -> bool {
        self.inner.instances.contains_key(id)
    }

    /// Evict an instance and count its terminal state.
    pub fn remove(&self, id: &BossId) -> Option<BossInstance> {
        let (_, instance) = self.inner.instances.remove(id)?;
        if let Some(entity) = instance.entity {
            self.inner.by_entity.remove(&entity);
        }
        self.inner.occupied.fetch_sub(1, Ordering::SeqCst);
        match instance.state() {
            LifecycleState::Dead => {
                self.inner.killed.fetch_add(1, Ordering::SeqCst);
            }
            LifecycleState::Despawned => {
                self.inner.despawned.fetch_add(1, Ordering::SeqCst);
            }
            state => warn!(boss = %id, ?state, "Removed a boss that never reached a terminal state"),
        }
        Some(instance)
    }

    /// Whether any active boss is within `radius` of `position`.
    pub fn any_active_within(&self, position: &Position, radius: f64) -> bool {
        self.inner
            .instances
            .iter()
            .any(|i| i.is_active() && i.position.range_to(position) <= radius)
    }

    /// Every registered id, oldest first.
    pub fn ids(&self) -> Vec<BossId> {
        let mut ids: Vec<_> = self
            .inner
            .instances
            .iter()
            .map(|i| (i.spawn_seq, *i.key()))
            .collect();
        ids.sort_by_key(|(seq, _)| *seq);
        ids.into_iter().map(|(_, id)| id).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.instances.is_empty()
    }

    pub fn list_active(&self) -> Vec<BossSummary> {
        let mut summaries: Vec<_> = self
            .inner
            .instances
            .iter()
            .filter(|i| i.is_active())
            .map(|i| (i.spawn_seq, i.summary()))
            .collect();
        summaries.sort_by_key(|(seq, _)| *seq);
        summaries.into_iter().map(|(_, s)| s).collect()
    }

    pub fn stats(&self) -> BossStats {
        BossStats {
            spawned: self.inner.spawned.load(Ordering::SeqCst),
            killed: self.inner.killed.load(Ordering::SeqCst),
            despawned: self.inner.despawned.load(Ordering::SeqCst),
            active: self.len(),
            max_concurrent: self.inner.max_concurrent,
        }
    }
}
