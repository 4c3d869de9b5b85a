//! Business logic for the lumen workspace.
//!
//! This crate owns the domain model and the two pieces of the tool with
//! real semantics:
//!
//! - **[`topology`]** — one snapshot read per invocation, joined into
//!   [`Room`]s, plus rooms-first exact-name resolution.
//! - **[`dispatch`]** — maps an [`Action`] onto the partial state write
//!   the bridge expects and applies it to the resolved [`Target`].
//!
//! The wire surface lives in `lumen-api`; persisted settings in
//! `lumen-config`.

pub mod dispatch;
pub mod error;
pub mod model;
pub mod topology;

pub use dispatch::{dispatch, state_update_for};
pub use error::CoreError;
pub use model::{Action, Light, NamedColor, Rgb, Room, Target, MAX_BRIGHTNESS};
pub use topology::{assemble, fetch, find_room, resolve};
