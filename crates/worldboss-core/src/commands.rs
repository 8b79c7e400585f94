//! Administrative commands accepted by the world boss service.

use serde::{Deserialize, Serialize};

use crate::enums::BossArchetype;
use crate::error::BossError;
use crate::types::Position;

/// All admin subcommands. Each maps to one exposed service operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AdminCommand {
    /// Force-spawn an archetype at the sender's position (ignores the cap).
    Spawn {
        archetype: BossArchetype,
        position: Position,
    },
    /// List active bosses.
    List,
    /// Remove every active boss.
    Clear,
    /// Show lifetime counters.
    Stats,
    /// Run one scheduler attempt immediately.
    Force,
    /// Flip the enabled flag.
    Toggle,
    /// Show configuration and occupancy.
    Info,
    /// Show usage.
    Help,
}

impl AdminCommand {
    /// Parse whitespace-separated arguments, e.g. `["spawn", "pyromancer"]`.
    ///
    /// `sender_position` is `None` when the sender is a console rather than
    /// an in-world player. Unknown or missing subcommands produce `Help`.
    pub fn parse(args: &[&str], sender_position: Option<Position>) -> Result<Self, BossError> {
        let Some(sub) = args.first() else {
            return Ok(AdminCommand::Help);
        };

        let command = match sub.to_ascii_lowercase().as_str() {
            "spawn" => {
                let position = sender_position.ok_or(BossError::NoSenderPosition)?;
                let name = args.get(1).ok_or(BossError::MissingArgument("type"))?;
                AdminCommand::Spawn {
                    archetype: name.parse()?,
                    position,
                }
            }
            "list" => AdminCommand::List,
            "clear" => AdminCommand::Clear,
            "stats" => AdminCommand::Stats,
            "force" => AdminCommand::Force,
            "toggle" => AdminCommand::Toggle,
            "info" => AdminCommand::Info,
            _ => AdminCommand::Help,
        };
        Ok(command)
    }
}
