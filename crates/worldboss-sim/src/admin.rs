//! Admin command execution. Every command answers with text lines.

use hecs::World;

use worldboss_core::catalog::get_profile;
use worldboss_core::commands::AdminCommand;
use worldboss_core::enums::BossArchetype;
use worldboss_core::error::BossError;
use worldboss_core::types::Position;

use crate::engine::WorldBossService;

/// Parse raw arguments and run the command.
pub fn execute_args(
    service: &mut WorldBossService,
    world: &mut World,
    args: &[&str],
    sender_position: Option<Position>,
) -> Vec<String> {
    match AdminCommand::parse(args, sender_position) {
        Ok(command) => execute(service, world, command),
        Err(BossError::MissingArgument(_)) => vec![
            "Usage: spawn <type>".to_string(),
            format!("Types: {}", archetype_ids()),
        ],
        Err(BossError::UnknownArchetype(name)) => vec![format!("Invalid boss type: {name}")],
        Err(e) => vec![format!("Error: {e}")],
    }
}

pub fn execute(service: &mut WorldBossService, world: &mut World, command: AdminCommand) -> Vec<String> {
    match command {
        AdminCommand::Spawn {
            archetype,
            position,
        } => {
            let name = get_profile(archetype).display_name;
            match service.force_spawn_instance(world, archetype, position) {
                Ok(_) => vec![format!("{name} spawned.")],
                Err(e) => vec![format!("Boss spawn failed: {e}")],
            }
        }
        AdminCommand::List => {
            let active = service.list_active();
            if active.is_empty() {
                return vec!["No active world bosses.".to_string()];
            }
            let mut lines = vec!["=== Active World Bosses ===".to_string()];
            lines.extend(active.iter().map(|s| s.to_string()));
            lines
        }
        AdminCommand::Clear => {
            let count = service.clear_all(world);
            vec![format!("{count} world bosses removed.")]
        }
        AdminCommand::Stats => vec![
            "=== World Boss Statistics ===".to_string(),
            service.stats().to_string(),
            service.debug_info(),
        ],
        AdminCommand::Force => {
            if service.try_spawn(world) {
                vec!["World boss spawned.".to_string()]
            } else {
                vec!["No boss spawned (conditions not met or unlucky roll).".to_string()]
            }
        }
        AdminCommand::Toggle => {
            let enabled = !service.is_enabled();
            service.set_enabled(world, enabled);
            let state = if enabled { "Enabled" } else { "Disabled" };
            vec![format!("World boss system: {state}")]
        }
        AdminCommand::Info => {
            let config = service.config();
            let stats = service.stats();
            vec![
                "=== World Boss System ===".to_string(),
                format!("Enabled: {}", if service.is_enabled() { "yes" } else { "no" }),
                format!("Active bosses: {}/{}", stats.active, stats.max_concurrent),
                format!(
                    "Interval: {}-{} min",
                    config.spawn.min_interval_minutes, config.spawn.max_interval_minutes
                ),
                format!("Chance: {:.0}%", config.spawn.chance * 100.0),
                format!(
                    "Spawn radius: {}-{} blocks",
                    config.spawn.min_radius, config.spawn.max_radius
                ),
            ]
        }
        AdminCommand::Help => help_lines(),
    }
}

pub fn help_lines() -> Vec<String> {
    let mut lines: Vec<String> = [
        "=== World Boss Admin ===",
        "spawn <type> - Spawn a boss at your position",
        "list - List active bosses",
        "clear - Remove every boss",
        "stats - Statistics",
        "force - Run one spawn attempt now",
        "toggle - Enable or disable the system",
        "info - System info",
        "",
        "Available types:",
    ]
    .into_iter()
    .map(String::from)
    .collect();
    lines.extend(
        BossArchetype::ALL
            .iter()
            .map(|a| format!("- {} ({})", a.id(), get_profile(*a).display_name)),
    );
    lines
}

fn archetype_ids() -> String {
    BossArchetype::ALL
        .iter()
        .map(|a| a.id())
        .collect::<Vec<_>>()
        .join(", ")
}
