//! Game loop thread: ticks the boss service at the fixed tick rate,
//! optionally sped up by `host.time_scale`.
//!
//! The world and the service live inside this thread. Admin commands arrive
//! over an `mpsc` channel; notifications and reward reports are drained
//! after every tick and written to the log.

use std::sync::mpsc;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info, trace};

use worldboss_core::constants::TICK_RATE;
use worldboss_core::events::BossNotification;
use worldboss_core::state::BossStats;
use worldboss_sim::admin;
use worldboss_sim::rewards::RewardReport;
use worldboss_sim::WorldBossService;

use crate::config::AppConfig;
use crate::demo::DemoWorld;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// Admin command words, e.g. `["spawn", "pyromancer"]`.
    Admin(Vec<String>),
    Shutdown,
}

/// What the loop did before it exited.
#[derive(Debug, Clone)]
pub struct LoopSummary {
    pub ticks: u64,
    pub stats: BossStats,
}

/// Simulated milliseconds covered by one tick.
pub const TICK_MILLIS: u64 = 1000 / TICK_RATE as u64;

/// Real time between ticks at `time_scale`.
pub fn tick_duration(time_scale: f64) -> Duration {
    Duration::from_millis(TICK_MILLIS).div_f64(time_scale)
}

/// Spawn the loop thread. It stops after `max_ticks` or on `Shutdown`.
pub fn spawn_game_loop(
    config: AppConfig,
    max_ticks: Option<u64>,
) -> anyhow::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<anyhow::Result<LoopSummary>>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("worldboss-game-loop".into())
        .spawn(move || run_game_loop(config, cmd_rx, max_ticks))
        .context("spawning game loop thread")?;

    Ok((cmd_tx, handle))
}

fn run_game_loop(
    config: AppConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    max_ticks: Option<u64>,
) -> anyhow::Result<LoopSummary> {
    let mut demo = DemoWorld::new(config.host.demo_players);
    let mut service = WorldBossService::new(config.worldboss.clone(), demo.host.services.clone())?;
    service.start();

    let tick_len = tick_duration(config.host.time_scale);
    let mut next_tick_time = Instant::now();
    let mut ticks = 0u64;

    'running: loop {
        // 1. Drain pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Admin(words)) => {
                    let args: Vec<&str> = words.iter().map(String::as_str).collect();
                    let position = demo.console_position();
                    for line in admin::execute_args(&mut service, &mut demo.world, &args, position) {
                        println!("{line}");
                    }
                }
                Ok(GameLoopCommand::Shutdown) => break 'running,
                // A closed console leaves the loop running until the tick limit.
                Err(mpsc::TryRecvError::Empty | mpsc::TryRecvError::Disconnected) => break,
            }
        }

        // 2. Advance the simulation
        let tick = service.time().tick;
        demo.host.clock.advance(TICK_MILLIS);
        service.tick(&mut demo.world);
        demo.step(&mut service, tick);
        ticks += 1;

        // 3. Report
        for notification in service.drain_notifications() {
            log_notification(&notification);
        }
        for report in service.drain_reward_reports() {
            log_report(&report);
        }

        if max_ticks.is_some_and(|max| ticks >= max) {
            break;
        }

        // 4. Sleep until the next tick
        next_tick_time += tick_len;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > tick_len * 2 {
            next_tick_time = now;
        }
    }

    service.stop(&mut demo.world);
    Ok(LoopSummary {
        ticks,
        stats: service.stats(),
    })
}

fn log_notification(notification: &BossNotification) {
    match notification {
        BossNotification::SpawnAlert {
            player, title_name, ..
        } => info!(%player, boss = %title_name, "Spawn alert"),
        BossNotification::Victory {
            player,
            boss_name,
            damage,
        } => info!(%player, boss = %boss_name, damage, "Victory"),
        BossNotification::TopDamagerBonus { player, points } => {
            info!(%player, points, "Top damager bonus")
        }
        BossNotification::Message { player, text } => debug!(%player, %text, "Message"),
        BossNotification::Title {
            player,
            title,
            subtitle,
        } => debug!(%player, %title, %subtitle, "Title"),
        BossNotification::HealthBar {
            boss_id,
            title,
            viewers,
            ..
        } => trace!(boss = %boss_id, %title, viewers = viewers.len(), "Health bar"),
        BossNotification::HealthBarCleared { boss_id } => debug!(boss = %boss_id, "Health bar cleared"),
    }
}

fn log_report(report: &RewardReport) {
    let paid: u64 = report.payouts.iter().map(|p| p.amount).sum();
    info!(
        boss = %report.boss_id,
        zone = report.zone,
        top_damager = ?report.top_damager,
        paid,
        skipped = report.skipped.len(),
        loot = report.loot.len(),
        position = %report.position,
        "Rewards distributed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();
        tx.send(GameLoopCommand::Admin(vec!["list".into()])).unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let commands: Vec<_> = rx.try_iter().collect();
        assert_eq!(commands.len(), 2);
        assert!(matches!(&commands[0], GameLoopCommand::Admin(words) if words == &["list"]));
        assert!(matches!(commands[1], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_tick_duration_scales_real_time_only() {
        assert_eq!(TICK_MILLIS, 50);
        assert_eq!(tick_duration(1.0), Duration::from_millis(50));
        assert_eq!(tick_duration(2.0), Duration::from_millis(25));
    }

    #[test]
    fn test_loop_stops_after_tick_limit() {
        let mut config = AppConfig::default();
        config.host.time_scale = 50.0;
        config.host.demo_players = 1;
        let (_tx, handle) = spawn_game_loop(config, Some(25)).unwrap();
        let summary = handle.join().unwrap().unwrap();
        assert_eq!(summary.ticks, 25);
        assert_eq!(summary.stats.spawned, 0);
    }

    #[test]
    fn test_admin_commands_reach_the_service() {
        let mut config = AppConfig::default();
        config.host.time_scale = 50.0;
        let (tx, handle) = spawn_game_loop(config, Some(10_000)).unwrap();
        tx.send(GameLoopCommand::Admin(vec!["spawn".into(), "ice_breaker".into()]))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let summary = handle.join().unwrap().unwrap();
        assert_eq!(summary.stats.spawned, 1);
        assert!(summary.ticks < 10_000);
    }
}
