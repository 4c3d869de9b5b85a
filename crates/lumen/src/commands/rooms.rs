//! Listing handlers: room names and per-room light names.

use lumen_core::{find_room, Room};

use crate::error::CliError;

/// Print every room name, one per line, in snapshot order.
pub fn list_rooms(rooms: &[Room]) {
    for room in rooms {
        println!("{}", room.name);
    }
}

/// Print the light names of one room, one per line, in bridge order.
pub fn list_lights(room_name: &str, rooms: &[Room]) -> Result<(), CliError> {
    let room = find_room(room_name, rooms)?;
    for light in &room.lights {
        println!("{}", light.name);
    }
    Ok(())
}
