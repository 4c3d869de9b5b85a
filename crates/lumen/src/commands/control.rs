//! Power and color handlers.
//!
//! A color ride-along upgrades `--turnOn` into a set-color dispatch; the
//! core normalizes brightness either way.

use lumen_api::BridgeClient;
use lumen_core::{dispatch, resolve, Action, NamedColor, Room};

use crate::error::CliError;

/// Turn a room or light on, optionally switching its color.
pub async fn turn_on(
    bridge: &BridgeClient,
    rooms: &[Room],
    name: &str,
    color: Option<NamedColor>,
) -> Result<(), CliError> {
    let target = resolve(name, rooms)?;

    let action = match color {
        Some(c) => {
            println!("Switching color of {name} to {c}");
            Action::SetColor(c.rgb())
        }
        None => {
            println!("Turning on {name}");
            Action::TurnOn
        }
    };

    dispatch(bridge, target, &action).await?;
    Ok(())
}

/// Turn a room or light off.
pub async fn turn_off(bridge: &BridgeClient, rooms: &[Room], name: &str) -> Result<(), CliError> {
    let target = resolve(name, rooms)?;
    println!("Turning off {name}");
    dispatch(bridge, target, &Action::TurnOff).await?;
    Ok(())
}
