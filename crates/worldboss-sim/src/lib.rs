//! World boss simulation.
//!
//! Owns boss instances and their timers, routes combat events from the
//! host world, schedules spawns, and distributes rewards.

pub mod admin;
pub mod config;
pub mod engine;
pub mod host;
pub mod instance;
pub mod ledger;
pub mod registry;
pub mod rewards;
pub mod router;
pub mod scheduler;
pub mod services;
pub mod systems;

pub use worldboss_core as core;
pub use engine::WorldBossService;
