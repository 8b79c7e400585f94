//! Core types and definitions for the world boss subsystem.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the archetype catalog, procedural modifiers, components, admin commands,
//! notifications, snapshots, errors, and constants. It has no dependency on the host
//! runtime or the ECS.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod modifiers;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
