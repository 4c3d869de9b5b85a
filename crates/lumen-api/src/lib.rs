//! Async HTTP client for a Hue-compatible lighting bridge.
//!
//! This crate owns the wire surface only: the public locator service
//! ([`discovery`]), the link-button pairing handshake ([`pairing`]), and
//! the credential-scoped bridge API ([`BridgeClient`]) for topology reads
//! and state writes. Domain modeling and name resolution live in
//! `lumen-core`.

pub mod bridge;
pub mod color;
pub mod discovery;
pub mod error;
pub mod models;
pub mod pairing;
pub mod transport;

pub use bridge::BridgeClient;
pub use discovery::{discover, discover_at, DiscoveredBridge, LOCATOR_URL};
pub use error::Error;
pub use models::{GroupAttributes, LightAttributes, LightState, StateUpdate};
pub use pairing::pair;
pub use transport::TransportConfig;
