//! Canonical domain types.
//!
//! Rooms and lights are read-only snapshots owned by the bridge; the CLI
//! fetches them fresh each invocation and never caches across runs.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString};

/// Maximum brightness the bridge accepts. `TurnOn` and `SetColor` always
/// normalize to this value.
pub const MAX_BRIGHTNESS: u8 = 254;

/// An RGB triple, decoupled from any host graphics type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Closed palette of user-selectable colors.
///
/// The triples match the original desktop palette constants, so `orange`
/// and `pink` are the familiar slightly-off values rather than pure hues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum NamedColor {
    White,
    Red,
    Green,
    Blue,
    Yellow,
    Orange,
    Magenta,
    Pink,
    Cyan,
}

impl NamedColor {
    /// The RGB triple for this palette entry.
    pub const fn rgb(self) -> Rgb {
        match self {
            Self::White => Rgb::new(255, 255, 255),
            Self::Red => Rgb::new(255, 0, 0),
            Self::Green => Rgb::new(0, 255, 0),
            Self::Blue => Rgb::new(0, 0, 255),
            Self::Yellow => Rgb::new(255, 255, 0),
            Self::Orange => Rgb::new(255, 200, 0),
            Self::Magenta => Rgb::new(255, 0, 255),
            Self::Pink => Rgb::new(255, 175, 175),
            Self::Cyan => Rgb::new(0, 255, 255),
        }
    }
}

/// A light snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Light {
    pub id: String,
    pub name: String,
    pub on: bool,
    /// Reported brightness, 0-254.
    pub brightness: u8,
    /// Reported color, if the light has one.
    pub color: Option<Rgb>,
}

/// A room snapshot carrying its member lights in bridge order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub lights: Vec<Light>,
}

/// What the user asked to do to a resolved target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Power on; brightness is normalized to [`MAX_BRIGHTNESS`].
    TurnOn,
    /// Power off; brightness and color are left untouched on the device.
    TurnOff,
    /// Set a color. Implies power-on and the same brightness normalization
    /// as [`Action::TurnOn`]; color is never set while leaving power off.
    SetColor(Rgb),
}

/// A resolved target, borrowing into the topology snapshot.
#[derive(Debug, Clone, Copy)]
pub enum Target<'a> {
    Room(&'a Room),
    Light(&'a Light),
}

impl Target<'_> {
    /// The display name of the resolved entity.
    pub fn name(&self) -> &str {
        match self {
            Self::Room(room) => &room.name,
            Self::Light(light) => &light.name,
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use super::{NamedColor, Rgb};

    #[test]
    fn palette_parses_case_insensitively_by_lowercase_name() {
        assert_eq!(NamedColor::from_str("red").unwrap(), NamedColor::Red);
        assert_eq!(NamedColor::from_str("cyan").unwrap(), NamedColor::Cyan);
        assert!(NamedColor::from_str("crimson").is_err());
    }

    #[test]
    fn palette_covers_nine_colors() {
        assert_eq!(NamedColor::iter().count(), 9);
    }

    #[test]
    fn palette_triples_match_desktop_constants() {
        assert_eq!(NamedColor::Orange.rgb(), Rgb::new(255, 200, 0));
        assert_eq!(NamedColor::Pink.rgb(), Rgb::new(255, 175, 175));
        assert_eq!(NamedColor::White.rgb(), Rgb::new(255, 255, 255));
    }
}
