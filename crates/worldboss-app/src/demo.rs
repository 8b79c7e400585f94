//! Scripted players for the demo host.
//!
//! Players walk toward the nearest boss they can see, hit it once per
//! second when in reach, and respawn in place when killed. Bosses swing at
//! the nearest player in melee range every two seconds.

use hecs::{Entity, World};

use worldboss_core::components::{AttackDamage, BossTag, Health, Player};
use worldboss_core::constants::{secs_to_ticks, ALERT_RADIUS};
use worldboss_core::types::Position;
use worldboss_sim::host::{self, deliver_attack, CircleRefuges, FlatTerrain, ReferenceHost, RingZones};
use worldboss_sim::WorldBossService;

/// Ring radius where the demo players start. Zone 3 with the default rings.
pub const CAMP_DISTANCE: f64 = 600.0;
pub const PLAYER_SPEED: f64 = 0.25;
pub const PLAYER_REACH: f64 = 4.0;
pub const PLAYER_HIT: f64 = 12.0;
pub const BOSS_REACH: f64 = 5.0;

const PLAYER_SWING_TICKS: u64 = secs_to_ticks(1);
const BOSS_SWING_TICKS: u64 = secs_to_ticks(2);
const GROUND_Z: i64 = 64;

pub struct DemoWorld {
    pub world: World,
    pub host: ReferenceHost,
    pub players: Vec<Entity>,
}

impl DemoWorld {
    pub fn new(player_count: usize) -> Self {
        let refuges = CircleRefuges {
            circles: vec![(Position::new(-CAMP_DISTANCE, 0.0, 65.0), 50.0)],
        };
        let host = ReferenceHost::with(RingZones::default(), FlatTerrain::new(GROUND_Z), refuges);
        let mut world = World::new();

        let players = (0..player_count)
            .map(|i| {
                let offset = i as f64 * 3.0;
                let position = Position::new(CAMP_DISTANCE + offset, offset, (GROUND_Z + 1) as f64);
                host::spawn_player(&mut world, &format!("player-{i}"), position).1
            })
            .collect();

        Self {
            world,
            host,
            players,
        }
    }

    /// Where admin commands typed at the console are issued from.
    pub fn console_position(&self) -> Option<Position> {
        let first = *self.players.first()?;
        self.world.get::<&Position>(first).ok().map(|p| *p)
    }

    /// One tick of scripted behavior. Call after the service tick.
    pub fn step(&mut self, service: &mut WorldBossService, tick: u64) {
        let bosses: Vec<(Entity, Position, f64)> = self
            .world
            .query::<(&BossTag, &Position, &AttackDamage)>()
            .iter()
            .map(|(e, (_, pos, dmg))| (e, *pos, dmg.value))
            .collect();
        if bosses.is_empty() {
            return;
        }

        for &player in &self.players {
            let Ok(position) = self.world.get::<&Position>(player).map(|p| *p) else {
                continue;
            };
            let Some(&(boss, boss_pos, _)) = bosses
                .iter()
                .filter(|(_, pos, _)| pos.range_to(&position) <= ALERT_RADIUS)
                .min_by(|a, b| a.1.range_to(&position).total_cmp(&b.1.range_to(&position)))
            else {
                continue;
            };

            let distance = boss_pos.horizontal_range_to(&position);
            if distance > PLAYER_REACH {
                approach(&mut self.world, player, &boss_pos, distance);
            } else if tick % PLAYER_SWING_TICKS == 0 {
                deliver_attack(&mut self.world, service, player, boss, PLAYER_HIT);
            }
        }

        if tick % BOSS_SWING_TICKS == 0 {
            for (boss, boss_pos, damage) in bosses {
                if !self.world.contains(boss) {
                    continue;
                }
                if let Some(target) = self.nearest_player(&boss_pos, BOSS_REACH) {
                    deliver_attack(&mut self.world, service, boss, target, damage);
                }
            }
        }

        self.respawn_dead();
    }

    fn nearest_player(&self, center: &Position, radius: f64) -> Option<Entity> {
        self.world
            .query::<(&Player, &Position)>()
            .iter()
            .map(|(e, (_, pos))| (e, pos.range_to(center)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(e, _)| e)
    }

    fn respawn_dead(&mut self) {
        for (_, (_, health)) in self.world.query_mut::<(&Player, &mut Health)>() {
            if health.current <= 0.0 {
                health.current = health.max;
            }
        }
    }
}

fn approach(world: &mut World, player: Entity, target: &Position, distance: f64) {
    if let Ok(mut pos) = world.get::<&mut Position>(player) {
        let step = PLAYER_SPEED.min(distance - PLAYER_REACH + 0.1);
        pos.x += (target.x - pos.x) / distance * step;
        pos.y += (target.y - pos.y) / distance * step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worldboss_core::enums::BossArchetype;
    use worldboss_sim::config::WorldBossConfig;

    fn service(demo: &DemoWorld) -> WorldBossService {
        let config = WorldBossConfig {
            enabled: false,
            ..Default::default()
        };
        WorldBossService::new(config, demo.host.services.clone()).unwrap()
    }

    #[test]
    fn test_players_start_outside_safe_zone() {
        let demo = DemoWorld::new(3);
        assert_eq!(demo.players.len(), 3);
        let pos = demo.console_position().unwrap();
        assert_eq!(pos.x, CAMP_DISTANCE);
        assert_eq!(demo.host.services.zones.zone_at(&pos), Some(3));
    }

    #[test]
    fn test_players_close_in_and_fight() {
        let mut demo = DemoWorld::new(2);
        let mut svc = service(&demo);
        svc.start();
        let boss_pos = Position::new(CAMP_DISTANCE + 20.0, 0.0, 65.0);
        let id = svc
            .force_spawn_instance(&mut demo.world, BossArchetype::IceBreaker, boss_pos)
            .unwrap();

        for tick in 0..400 {
            svc.tick(&mut demo.world);
            demo.step(&mut svc, tick);
        }

        let registry = svc.registry();
        let instance = registry.get(&id).unwrap();
        assert_eq!(instance.ledger.len(), 2);
        assert!(instance.health < instance.max_health);
        for &player in &demo.players {
            assert!(demo.world.get::<&Health>(player).unwrap().current > 0.0);
        }
    }

    #[test]
    fn test_step_without_bosses_is_idle() {
        let mut demo = DemoWorld::new(1);
        let mut svc = service(&demo);
        let before = demo.console_position().unwrap();
        demo.step(&mut svc, 0);
        assert_eq!(demo.console_position().unwrap(), before);
    }
}
