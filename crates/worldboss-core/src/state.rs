//! Read-only snapshots served to admin tooling and other threads.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::enums::{BossArchetype, LifecycleState};
use crate::types::{BossId, Position, ZoneId};

/// One active boss, as listed by admin tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSummary {
    pub id: BossId,
    pub archetype: BossArchetype,
    pub display_name: String,
    pub zone: ZoneId,
    pub state: LifecycleState,
    pub health: f64,
    pub max_health: f64,
    pub position: Position,
}

impl fmt::Display for BossSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Zone {}) - {:.0}/{:.0} @ {}",
            self.display_name, self.zone, self.health, self.max_health, self.position
        )
    }
}

/// Lifetime counters plus the current occupancy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossStats {
    pub spawned: u64,
    pub killed: u64,
    pub despawned: u64,
    pub active: usize,
    pub max_concurrent: usize,
}

impl fmt::Display for BossStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Active: {}/{} | Spawned: {} | Killed: {} | Despawned: {}",
            self.active, self.max_concurrent, self.spawned, self.killed, self.despawned
        )
    }
}

/// Scheduler timing, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerInfo {
    /// Milliseconds until the next spawn attempt is allowed.
    pub until_next_attempt_ms: u64,
    /// Milliseconds since the last attempt, if any.
    pub since_last_attempt_ms: Option<u64>,
}

impl fmt::Display for SchedulerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let minutes = self.until_next_attempt_ms / 60_000;
        let seconds = (self.until_next_attempt_ms % 60_000) / 1000;
        write!(f, "Next check: {}m {}s | Last: ", minutes, seconds)?;
        match self.since_last_attempt_ms {
            Some(ms) => write!(f, "{}m ago", ms / 60_000),
            None => f.write_str("never"),
        }
    }
}
