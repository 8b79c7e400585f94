//! Systems that run against the host world each tick.
//!
//! Systems are plain functions over `&mut World` and one instance record.
//! They never touch the registry while holding an instance guard.

pub mod abilities;
pub mod cleanup;
pub mod despawn;
pub mod effects;
pub mod observers;
pub mod perception;
