//! Wire types for the bridge's local JSON API.
//!
//! Field names follow the bridge payloads exactly; `lumen-core` converts
//! these into its canonical domain types.

use serde::{Deserialize, Serialize};

/// One group record from `GET /api/{user}/groups`.
///
/// The bridge models rooms as groups with `"type": "Room"`; other group
/// types (zones, entertainment areas) share the same shape.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupAttributes {
    pub name: String,
    /// Member light ids, in the bridge's insertion order.
    #[serde(default)]
    pub lights: Vec<String>,
    #[serde(rename = "type", default)]
    pub group_type: String,
}

impl GroupAttributes {
    /// Whether this group is a room (as opposed to a zone or similar).
    pub fn is_room(&self) -> bool {
        self.group_type == "Room"
    }
}

/// One light record from `GET /api/{user}/lights`.
#[derive(Debug, Clone, Deserialize)]
pub struct LightAttributes {
    pub name: String,
    pub state: LightState,
}

/// Reported light state.
#[derive(Debug, Clone, Deserialize)]
pub struct LightState {
    pub on: bool,
    /// Brightness 1-254; absent on on/off-only lights.
    #[serde(default)]
    pub bri: Option<u8>,
    /// CIE xy chromaticity; absent on non-color lights.
    #[serde(default)]
    pub xy: Option<[f64; 2]>,
}

/// Partial state write for `PUT .../state` (lights) or `PUT .../action`
/// (groups). Only fields that are set end up in the request body, so a
/// plain power-off never touches brightness or color on the device.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub on: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bri: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xy: Option<[f64; 2]>,
}

impl StateUpdate {
    /// Power on, nothing else.
    pub fn on() -> Self {
        Self {
            on: Some(true),
            bri: None,
            xy: None,
        }
    }

    /// Power off, nothing else.
    pub fn off() -> Self {
        Self {
            on: Some(false),
            bri: None,
            xy: None,
        }
    }

    /// Set the brightness field (0-254).
    pub fn with_brightness(mut self, bri: u8) -> Self {
        self.bri = Some(bri);
        self
    }

    /// Set the CIE xy color field.
    pub fn with_xy(mut self, xy: [f64; 2]) -> Self {
        self.xy = Some(xy);
        self
    }
}
