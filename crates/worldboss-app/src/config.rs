//! Host configuration file.
//!
//! One TOML document with a `[worldboss]` table for the service and
//! `[logging]` / `[host]` tables for this binary. A missing file is created
//! with defaults on first run.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use tracing::info;

use worldboss_sim::config::WorldBossConfig;

use crate::cli::CliArgs;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_level() -> String {
    "info".to_string()
}

fn default_time_scale() -> f64 {
    1.0
}

fn default_demo_players() -> usize {
    4
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub worldboss: WorldBossConfig,
    #[serde(default)]
    pub logging: LoggingSettings,
    #[serde(default)]
    pub host: HostSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub json_format: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostSettings {
    /// Wall-clock speed-up of the fixed-rate simulation. Each tick always
    /// covers the same simulated time; 2.0 runs it twice as fast.
    #[serde(default = "default_time_scale")]
    pub time_scale: f64,
    /// Scripted players walking the demo world.
    #[serde(default = "default_demo_players")]
    pub demo_players: usize,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_level(),
            json_format: false,
        }
    }
}

impl Default for HostSettings {
    fn default() -> Self {
        Self {
            time_scale: default_time_scale(),
            demo_players: default_demo_players(),
        }
    }
}

impl AppConfig {
    /// Read `path`, or write the defaults there if it does not exist.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = AppConfig::default();
            let content = toml::to_string_pretty(&config)?;
            std::fs::write(path, content)
                .with_context(|| format!("writing default config to {}", path.display()))?;
            info!(path = %path.display(), "Created default configuration file");
            Ok(config)
        }
    }

    pub fn apply_overrides(&mut self, args: &CliArgs) {
        if let Some(level) = &args.log_level {
            self.logging.level = level.clone();
        }
        if let Some(seed) = args.seed {
            self.worldboss.seed = seed;
        }
        if let Some(players) = args.players {
            self.host.demo_players = players;
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.worldboss.validate()?;
        if !LOG_LEVELS.contains(&self.logging.level.to_ascii_lowercase().as_str()) {
            bail!("invalid log level: {}", self.logging.level);
        }
        if !self.host.time_scale.is_finite() || self.host.time_scale <= 0.0 {
            bail!("host.time_scale must be positive, got {}", self.host.time_scale);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn no_overrides() -> CliArgs {
        CliArgs {
            config_path: PathBuf::from("unused.toml"),
            log_level: None,
            json_logs: false,
            seed: None,
            ticks: None,
            players: None,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.host.time_scale, 1.0);
        assert_eq!(config.host.demo_players, 4);
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json_format);
    }

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("worldboss.toml");

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let reloaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            "[worldboss]\nmax_concurrent = 3\n\n[worldboss.spawn]\nchance = 0.4\n\n[host]\ndemo_players = 9\n",
        )
        .unwrap();

        let config = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(config.worldboss.max_concurrent, 3);
        assert_eq!(config.worldboss.spawn.chance, 0.4);
        assert_eq!(config.worldboss.spawn.max_interval_minutes, 40);
        assert_eq!(config.host.demo_players, 9);
        assert_eq!(config.host.time_scale, 1.0);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[worldboss\nmax_concurrent = ").unwrap();
        assert!(AppConfig::load_from_file(&path).is_err());
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());

        for scale in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            let mut config = AppConfig::default();
            config.host.time_scale = scale;
            assert!(config.validate().is_err(), "accepted time_scale {scale}");
        }

        let mut config = AppConfig::default();
        config.worldboss.spawn.min_interval_minutes = 90;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();
        let args = CliArgs {
            log_level: Some("debug".to_string()),
            seed: Some(7),
            players: Some(2),
            ..no_overrides()
        };
        config.apply_overrides(&args);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.worldboss.seed, 7);
        assert_eq!(config.host.demo_players, 2);

        let mut untouched = AppConfig::default();
        untouched.apply_overrides(&no_overrides());
        assert_eq!(untouched, AppConfig::default());
    }
}
