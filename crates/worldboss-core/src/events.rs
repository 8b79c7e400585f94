//! Notifications emitted by the subsystem for the host to deliver to players.

use serde::{Deserialize, Serialize};

use crate::types::{BossId, PlayerId};

/// Player-facing output. The host drains these each tick and renders them
/// however its client protocol requires.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BossNotification {
    /// A boss appeared near this player.
    SpawnAlert {
        player: PlayerId,
        boss_id: BossId,
        title_name: String,
        ability: String,
    },
    /// Chat line for one player.
    Message { player: PlayerId, text: String },
    /// Large on-screen title for one player.
    Title {
        player: PlayerId,
        title: String,
        subtitle: String,
    },
    /// Health bar state for everyone currently observing a boss.
    HealthBar {
        boss_id: BossId,
        title: String,
        progress: f64,
        viewers: Vec<PlayerId>,
    },
    /// The boss is gone; remove its bar from every client.
    HealthBarCleared { boss_id: BossId },
    /// Extra feedback for the player who dealt the most damage.
    TopDamagerBonus { player: PlayerId, points: u64 },
    /// Sent to each online participant after a kill.
    Victory {
        player: PlayerId,
        boss_name: String,
        damage: f64,
    },
}

impl BossNotification {
    /// The single recipient, if this notification targets one player.
    pub fn recipient(&self) -> Option<PlayerId> {
        match self {
            BossNotification::SpawnAlert { player, .. }
            | BossNotification::Message { player, .. }
            | BossNotification::Title { player, .. }
            | BossNotification::TopDamagerBonus { player, .. }
            | BossNotification::Victory { player, .. } => Some(*player),
            BossNotification::HealthBar { .. } | BossNotification::HealthBarCleared { .. } => None,
        }
    }
}
