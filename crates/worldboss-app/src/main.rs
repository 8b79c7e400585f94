use std::io::BufRead;
use std::sync::mpsc;

use anyhow::{anyhow, Context};
use clap::Parser;
use tracing::{info, warn};

use worldboss_app::cli::CliArgs;
use worldboss_app::config::AppConfig;
use worldboss_app::game_loop::{self, GameLoopCommand};
use worldboss_app::logging;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    let mut config = AppConfig::load_from_file(&args.config_path)
        .with_context(|| format!("loading {}", args.config_path.display()))?;
    config.apply_overrides(&args);
    config.validate()?;

    logging::setup_logging(&config.logging, args.json_logs)?;
    info!(config = %args.config_path.display(), "World boss host starting");

    let (cmd_tx, handle) = game_loop::spawn_game_loop(config, args.ticks)?;
    spawn_console(cmd_tx)?;

    let summary = handle
        .join()
        .map_err(|_| anyhow!("game loop thread panicked"))??;
    info!(
        ticks = summary.ticks,
        spawned = summary.stats.spawned,
        killed = summary.stats.killed,
        despawned = summary.stats.despawned,
        "World boss host stopped"
    );
    Ok(())
}

/// Forward stdin lines to the game loop as admin commands.
fn spawn_console(cmd_tx: mpsc::Sender<GameLoopCommand>) -> anyhow::Result<()> {
    std::thread::Builder::new()
        .name("worldboss-console".into())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else {
                    break;
                };
                let command = match line.trim() {
                    "" => continue,
                    "quit" | "exit" => GameLoopCommand::Shutdown,
                    text => GameLoopCommand::Admin(text.split_whitespace().map(String::from).collect()),
                };
                let shutdown = matches!(command, GameLoopCommand::Shutdown);
                if cmd_tx.send(command).is_err() || shutdown {
                    break;
                }
            }
            warn!("Console closed");
        })
        .context("spawning console thread")?;
    Ok(())
}
