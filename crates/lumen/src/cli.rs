//! Clap derive structures for the `lumen` CLI.
//!
//! The surface is flag-based, one primary action per run. Action flags are
//! mutually exclusive; `--color` only rides along with `--turnOn`.

use clap::{ArgGroup, Parser};
use color_arg::parse_color;

use lumen_core::NamedColor;

/// lumen -- control a Hue lighting bridge from the command line
#[derive(Debug, Parser)]
#[command(
    name = "lumen",
    version,
    about = "Control rooms and lights on a Hue bridge by name",
    long_about = "A single-shot controller for a local Hue lighting bridge.\n\n\
        Pairs with the bridge on first run (press the link button when asked),\n\
        stores the credential, and lets you list rooms and lights or toggle\n\
        power and color by name.",
    group(ArgGroup::new("action").multiple(false))
)]
pub struct Cli {
    /// Run the setup process, even if a configuration already exists
    #[arg(long, short = 's')]
    pub setup: bool,

    /// List room names
    #[arg(long, short = 'r', group = "action")]
    pub rooms: bool,

    /// List light names in a room
    #[arg(long, short = 'l', value_name = "ROOM", group = "action")]
    pub lights: Option<String>,

    /// Turn on a room or light (matched by name)
    #[arg(long = "turnOn", value_name = "NAME", group = "action")]
    pub turn_on: Option<String>,

    /// Turn off a room or light (matched by name)
    #[arg(long = "turnOff", value_name = "NAME", group = "action")]
    pub turn_off: Option<String>,

    /// Color to apply, used in combination with --turnOn
    #[arg(long, short = 'c', value_name = "COLOR", value_parser = parse_color, requires = "turn_on", conflicts_with = "turn_off")]
    pub color: Option<NamedColor>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Request timeout in seconds
    #[arg(long, env = "LUMEN_TIMEOUT", default_value = "30")]
    pub timeout: u64,
}

/// The primary action selected for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunCommand {
    Rooms,
    Lights { room: String },
    TurnOn {
        name: String,
        color: Option<NamedColor>,
    },
    TurnOff { name: String },
}

impl Cli {
    /// Collapse the flag soup into at most one command. Clap's arg group
    /// guarantees the variants are mutually exclusive.
    pub fn run_command(&self) -> Option<RunCommand> {
        if self.rooms {
            return Some(RunCommand::Rooms);
        }
        if let Some(room) = &self.lights {
            return Some(RunCommand::Lights { room: room.clone() });
        }
        if let Some(name) = &self.turn_on {
            return Some(RunCommand::TurnOn {
                name: name.clone(),
                color: self.color,
            });
        }
        if let Some(name) = &self.turn_off {
            return Some(RunCommand::TurnOff { name: name.clone() });
        }
        None
    }
}

mod color_arg {
    use std::str::FromStr;

    use strum::IntoEnumIterator;

    use lumen_core::NamedColor;

    /// Case-insensitive palette lookup with the full palette in the error.
    pub(super) fn parse_color(value: &str) -> Result<NamedColor, String> {
        NamedColor::from_str(&value.to_ascii_lowercase()).map_err(|_| {
            let palette: Vec<String> = NamedColor::iter().map(|c| c.to_string()).collect();
            format!("unknown color '{value}' (expected one of: {})", palette.join(", "))
        })
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use clap::Parser;

    use super::{Cli, RunCommand};
    use lumen_core::NamedColor;

    #[test]
    fn turn_on_with_color_parses() {
        let cli = Cli::parse_from(["lumen", "--turnOn", "Kitchen", "--color", "red"]);
        assert_eq!(
            cli.run_command(),
            Some(RunCommand::TurnOn {
                name: "Kitchen".into(),
                color: Some(NamedColor::Red),
            })
        );
    }

    #[test]
    fn color_is_case_insensitive() {
        let cli = Cli::parse_from(["lumen", "--turnOn", "Lamp", "-c", "CYAN"]);
        assert!(matches!(
            cli.run_command(),
            Some(RunCommand::TurnOn {
                color: Some(NamedColor::Cyan),
                ..
            })
        ));
    }

    #[test]
    fn color_requires_turn_on() {
        assert!(Cli::try_parse_from(["lumen", "--color", "red"]).is_err());
        assert!(Cli::try_parse_from(["lumen", "--turnOff", "Lamp", "--color", "red"]).is_err());
    }

    #[test]
    fn action_flags_are_mutually_exclusive() {
        assert!(Cli::try_parse_from(["lumen", "--rooms", "--turnOn", "Lamp"]).is_err());
        assert!(Cli::try_parse_from(["lumen", "--turnOn", "a", "--turnOff", "b"]).is_err());
    }

    #[test]
    fn setup_combines_with_an_action() {
        let cli = Cli::parse_from(["lumen", "--setup", "--rooms"]);
        assert!(cli.setup);
        assert_eq!(cli.run_command(), Some(RunCommand::Rooms));
    }

    #[test]
    fn no_flags_means_no_command() {
        let cli = Cli::parse_from(["lumen"]);
        assert_eq!(cli.run_command(), None);
    }
}
