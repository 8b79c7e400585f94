//! Error types for the world boss subsystem.

use thiserror::Error;

use crate::types::{PlayerId, Position};

/// Errors surfaced by exposed operations and admin input handling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BossError {
    #[error("unknown boss archetype: {0}")]
    UnknownArchetype(String),

    #[error("missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("this command must be run by a player with a position")]
    NoSenderPosition,

    #[error("concurrent boss limit reached ({max})")]
    CapacityReached { max: usize },

    #[error("no valid spawn location found")]
    NoSpawnLocation,

    #[error("position {0} is outside the map")]
    OutsideMap(Position),

    #[error("world boss system is disabled")]
    Disabled,

    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Errors reported by consumed collaborator services.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    #[error("player {0} is offline")]
    PlayerOffline(PlayerId),

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
