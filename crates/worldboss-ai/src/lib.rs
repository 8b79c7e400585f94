//! Boss behavior for the world boss subsystem.
//!
//! Implements the per-archetype strategy table: pure functions that read a
//! view of the boss and its surroundings and return the next behavior state
//! plus a list of effects for the simulation to apply. Procedural traits
//! layer extra effects on top, and [`procedural`] rolls them from a seed.

pub mod archetypes;
pub mod procedural;
pub mod strategy;
pub mod traits;

pub use worldboss_core as core;

#[cfg(test)]
mod tests;
