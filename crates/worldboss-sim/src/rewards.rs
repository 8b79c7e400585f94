//! Payouts and loot for a killed boss.

use std::collections::HashSet;

use hecs::World;
use tracing::{debug, warn};

use worldboss_core::components::{DroppedItem, Player};
use worldboss_core::constants::*;
use worldboss_core::enums::Rarity;
use worldboss_core::events::BossNotification;
use worldboss_core::types::{BossId, LootItem, PlayerId, Position, ZoneId};

use crate::instance::BossInstance;
use crate::services::BossServices;

/// One successful currency grant.
#[derive(Debug, Clone, PartialEq)]
pub struct Payout {
    pub player: PlayerId,
    pub amount: u64,
    pub reason: &'static str,
}

/// Everything one distribution did.
#[derive(Debug, Clone, PartialEq)]
pub struct RewardReport {
    pub boss_id: BossId,
    pub zone: ZoneId,
    pub top_damager: Option<PlayerId>,
    pub payouts: Vec<Payout>,
    /// Participants who were offline or whose payout failed.
    pub skipped: Vec<PlayerId>,
    pub loot: Vec<LootItem>,
    /// Where the loot was dropped.
    pub position: Position,
}

/// Currency for the top damager.
pub fn top_damager_points(zone: ZoneId) -> u64 {
    REWARD_BASE_POINTS + zone as u64 * REWARD_POINTS_PER_ZONE
}

/// Number of epic-or-better items.
pub fn epic_item_count(zone: ZoneId) -> u32 {
    1 + (zone / LOOT_ZONES_PER_EXTRA_ITEM).min(LOOT_MAX_EXTRA_ITEMS)
}

/// Pay participants, drop loot, and send victory notifications.
///
/// The ledger is read, never modified. `killer` takes the top share only
/// when the ledger is empty.
pub fn distribute(
    world: &mut World,
    instance: &BossInstance,
    killer: Option<PlayerId>,
    services: &BossServices,
    notifications: &mut Vec<BossNotification>,
) -> RewardReport {
    let online: HashSet<PlayerId> = world
        .query::<&Player>()
        .iter()
        .map(|(_, p)| p.id)
        .collect();
    let participants = instance.ledger.participants();
    let top_damager = instance.ledger.top_damager().map(|(id, _)| id).or(killer);

    let mut report = RewardReport {
        boss_id: instance.id,
        zone: instance.zone,
        top_damager,
        payouts: Vec::new(),
        skipped: Vec::new(),
        loot: Vec::new(),
        position: instance.position,
    };

    let top_points = top_damager_points(instance.zone);
    if let Some(top) = top_damager {
        if pay(services, &online, top, top_points, REASON_TOP_DAMAGER, &mut report) {
            notifications.push(BossNotification::TopDamagerBonus {
                player: top,
                points: top_points,
            });
        }
    }

    let share = top_points / 2;
    for (player, _) in participants.iter().filter(|(p, _)| Some(*p) != top_damager) {
        pay(services, &online, *player, share, REASON_PARTICIPATION, &mut report);
    }

    drop_loot(world, instance, services, &mut report);

    let boss_name = instance.display_name();
    for (player, damage) in participants {
        if online.contains(&player) {
            notifications.push(BossNotification::Victory {
                player,
                boss_name: boss_name.to_string(),
                damage,
            });
        }
    }

    report
}

fn pay(
    services: &BossServices,
    online: &HashSet<PlayerId>,
    player: PlayerId,
    amount: u64,
    reason: &'static str,
    report: &mut RewardReport,
) -> bool {
    if !online.contains(&player) {
        warn!(%player, amount, reason, "Skipping payout: player offline");
        report.skipped.push(player);
        return false;
    }
    match services.economy.add_points(player, amount, reason) {
        Ok(()) => {
            report.payouts.push(Payout {
                player,
                amount,
                reason,
            });
            true
        }
        Err(e) => {
            warn!(%player, amount, reason, error = %e, "Skipping payout: economy error");
            report.skipped.push(player);
            false
        }
    }
}

fn drop_loot(
    world: &mut World,
    instance: &BossInstance,
    services: &BossServices,
    report: &mut RewardReport,
) {
    let zone = instance.zone;
    let items = &services.items;
    let luck = LOOT_LUCK_BONUS * instance.modifiers.difficulty_multiplier();

    let mut rolled: Vec<Option<LootItem>> = (0..epic_item_count(zone))
        .map(|_| items.generate(zone, Rarity::Epic, luck))
        .collect();
    rolled.push(items.generate(zone, Rarity::Legendary, luck));
    rolled.extend((0..LOOT_CONSUMABLES).map(|_| items.generate_consumable(zone, luck)));

    let requested = rolled.len();
    for item in rolled.into_iter().flatten() {
        world.spawn((DroppedItem { item: item.clone() }, report.position));
        report.loot.push(item);
    }
    if report.loot.len() < requested {
        debug!(
            boss = %instance.id,
            dropped = report.loot.len(),
            requested,
            "Some loot slots produced nothing"
        );
    }
}
