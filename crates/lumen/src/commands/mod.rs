//! Command handlers for the `lumen` binary.

pub mod control;
pub mod rooms;
pub mod setup;
