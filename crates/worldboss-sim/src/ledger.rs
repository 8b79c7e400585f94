//! Per-instance damage attribution.

use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use worldboss_core::types::PlayerId;

/// One attacker's running total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerEntry {
    pub total: f64,
    /// Registration order, assigned on the attacker's first hit.
    pub seq: u64,
}

/// Attacker id to cumulative damage. Entries appear on first hit.
///
/// Writes happen on the simulation thread; readers on other threads see a
/// consistent per-entry view.
#[derive(Debug, Default)]
pub struct DamageLedger {
    entries: DashMap<PlayerId, LedgerEntry>,
    next_seq: AtomicU64,
}

impl DamageLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to the attacker's total and return the new total.
    pub fn record(&self, attacker: PlayerId, amount: f64) -> f64 {
        let mut entry = self.entries.entry(attacker).or_insert_with(|| LedgerEntry {
            total: 0.0,
            seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
        });
        entry.total += amount;
        entry.total
    }

    pub fn total(&self, attacker: PlayerId) -> Option<f64> {
        self.entries.get(&attacker).map(|e| e.total)
    }

    /// Sum over all attackers.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(|e| e.total).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Highest total; ties go to whoever registered first.
    pub fn top_damager(&self) -> Option<(PlayerId, f64)> {
        self.entries
            .iter()
            .map(|e| (*e.key(), *e.value()))
            .max_by(|(_, a), (_, b)| a.total.total_cmp(&b.total).then_with(|| b.seq.cmp(&a.seq)))
            .map(|(id, entry)| (id, entry.total))
    }

    /// All attackers in registration order.
    pub fn participants(&self) -> Vec<(PlayerId, f64)> {
        let mut all: Vec<_> = self
            .entries
            .iter()
            .map(|e| (*e.key(), *e.value()))
            .collect();
        all.sort_by_key(|(_, entry)| entry.seq);
        all.into_iter().map(|(id, entry)| (id, entry.total)).collect()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
