//! World boss demo host.
//!
//! Wires the boss service into a fixed-rate loop over an in-memory world,
//! with a stdin admin console and a handful of scripted players.

pub mod cli;
pub mod config;
pub mod demo;
pub mod game_loop;
pub mod logging;

pub use worldboss_sim as sim;
