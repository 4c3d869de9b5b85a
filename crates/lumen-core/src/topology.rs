//! Topology snapshot and name resolution.
//!
//! One snapshot read per invocation: groups and lights are fetched once,
//! joined into [`Room`]s, and discarded at process exit. Resolution is
//! rooms-first with exact, case-sensitive matching; a room and a light
//! sharing a name always resolves to the room.

use std::collections::BTreeMap;

use tracing::debug;

use lumen_api::color::xy_to_rgb;
use lumen_api::{BridgeClient, GroupAttributes, LightAttributes};

use crate::error::CoreError;
use crate::model::{Light, Rgb, Room, Target};

/// Fetch a fresh topology snapshot from the bridge.
///
/// Any transport failure here is fatal for the run. Only groups of type
/// `Room` are kept; rooms are ordered by numeric id so a given bridge
/// always yields the same sequence.
pub async fn fetch(client: &BridgeClient) -> Result<Vec<Room>, CoreError> {
    let groups = client.groups().await.map_err(CoreError::unreachable)?;
    let lights = client.lights().await.map_err(CoreError::unreachable)?;

    let rooms = assemble(groups, &lights);
    debug!(rooms = rooms.len(), "topology snapshot fetched");
    Ok(rooms)
}

/// Join group and light records into domain rooms.
///
/// Lights within a room keep the group's member order; member ids with no
/// matching light record are skipped (the bridge reports these after a
/// light is deleted mid-sync).
pub fn assemble(
    groups: BTreeMap<String, GroupAttributes>,
    lights: &BTreeMap<String, LightAttributes>,
) -> Vec<Room> {
    let mut entries: Vec<(String, GroupAttributes)> = groups
        .into_iter()
        .filter(|(_, g)| g.is_room())
        .collect();
    entries.sort_by_key(|(id, _)| numeric_id(id));

    entries
        .into_iter()
        .map(|(id, group)| Room {
            id,
            name: group.name,
            lights: group
                .lights
                .iter()
                .filter_map(|light_id| {
                    lights
                        .get(light_id)
                        .map(|attrs| to_light(light_id.clone(), attrs))
                })
                .collect(),
        })
        .collect()
}

fn to_light(id: String, attrs: &LightAttributes) -> Light {
    let brightness = attrs.state.bri.unwrap_or(0);
    Light {
        id,
        name: attrs.name.clone(),
        on: attrs.state.on,
        brightness,
        color: attrs.state.xy.map(|xy| {
            let (r, g, b) = xy_to_rgb(xy, brightness);
            Rgb::new(r, g, b)
        }),
    }
}

/// Sort key for bridge ids: numeric where possible so "10" sorts after "2".
fn numeric_id(id: &str) -> (u64, String) {
    match id.parse::<u64>() {
        Ok(n) => (n, String::new()),
        Err(_) => (u64::MAX, id.to_owned()),
    }
}

/// Resolve a user-supplied name against the snapshot.
///
/// Rooms are searched first (exact, case-sensitive). Only if no room
/// matches are the lights scanned, flattened across rooms in room-then-
/// light insertion order, first exact match wins. Duplicate names keep
/// first-match semantics.
pub fn resolve<'a>(name: &str, rooms: &'a [Room]) -> Result<Target<'a>, CoreError> {
    if let Some(room) = rooms.iter().find(|r| r.name == name) {
        return Ok(Target::Room(room));
    }

    rooms
        .iter()
        .flat_map(|r| r.lights.iter())
        .find(|l| l.name == name)
        .map(Target::Light)
        .ok_or_else(|| CoreError::TargetNotFound {
            name: name.to_owned(),
        })
}

/// Find a room by exact name, for room-scoped listings.
pub fn find_room<'a>(name: &str, rooms: &'a [Room]) -> Result<&'a Room, CoreError> {
    rooms
        .iter()
        .find(|r| r.name == name)
        .ok_or_else(|| CoreError::TargetNotFound {
            name: name.to_owned(),
        })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::{find_room, resolve};
    use crate::error::CoreError;
    use crate::model::{Light, Room, Target};

    fn light(id: &str, name: &str) -> Light {
        Light {
            id: id.into(),
            name: name.into(),
            on: false,
            brightness: 0,
            color: None,
        }
    }

    fn room(id: &str, name: &str, lights: Vec<Light>) -> Room {
        Room {
            id: id.into(),
            name: name.into(),
            lights,
        }
    }

    #[test]
    fn resolve_prefers_room_over_same_named_light() {
        let rooms = vec![
            room("1", "Kitchen", vec![light("3", "Kitchen")]),
            room("2", "Office", vec![light("4", "Desk")]),
        ];
        match resolve("Kitchen", &rooms).unwrap() {
            Target::Room(r) => assert_eq!(r.id, "1"),
            Target::Light(_) => panic!("room must shadow the light"),
        }
    }

    #[test]
    fn resolve_falls_through_to_lights_in_room_order() {
        let rooms = vec![
            room("1", "Kitchen", vec![light("3", "Lamp")]),
            room("2", "Office", vec![light("4", "Lamp")]),
        ];
        match resolve("Lamp", &rooms).unwrap() {
            Target::Light(l) => assert_eq!(l.id, "3", "first match in room order wins"),
            Target::Room(_) => panic!("expected a light"),
        }
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let rooms = vec![room("1", "Kitchen", vec![])];
        assert!(matches!(
            resolve("kitchen", &rooms),
            Err(CoreError::TargetNotFound { .. })
        ));
    }

    #[test]
    fn resolve_unknown_name_is_not_found() {
        let rooms = vec![room("1", "Kitchen", vec![light("3", "Lamp")])];
        let err = resolve("Unknown", &rooms).unwrap_err();
        match err {
            CoreError::TargetNotFound { name } => assert_eq!(name, "Unknown"),
            other => panic!("expected TargetNotFound, got {other:?}"),
        }
    }

    #[test]
    fn resolve_is_deterministic() {
        let rooms = vec![
            room("1", "A", vec![light("3", "Lamp"), light("4", "Lamp")]),
        ];
        for _ in 0..3 {
            match resolve("Lamp", &rooms).unwrap() {
                Target::Light(l) => assert_eq!(l.id, "3"),
                Target::Room(_) => panic!("expected a light"),
            }
        }
    }

    #[test]
    fn find_room_ignores_lights() {
        let rooms = vec![room("1", "Kitchen", vec![light("3", "Lamp")])];
        assert!(find_room("Kitchen", &rooms).is_ok());
        assert!(matches!(
            find_room("Lamp", &rooms),
            Err(CoreError::TargetNotFound { .. })
        ));
    }

    mod assembly {
        use std::collections::BTreeMap;

        use pretty_assertions::assert_eq;

        use crate::topology::assemble;

        fn wire_group(name: &str, lights: &[&str], group_type: &str) -> lumen_api::GroupAttributes {
            serde_json::from_value(serde_json::json!({
                "name": name,
                "lights": lights,
                "type": group_type,
            }))
            .unwrap()
        }

        fn wire_light(name: &str, on: bool, bri: u8) -> lumen_api::LightAttributes {
            serde_json::from_value(serde_json::json!({
                "name": name,
                "state": { "on": on, "bri": bri },
            }))
            .unwrap()
        }

        #[test]
        fn rooms_sort_numerically_and_keep_member_order() {
            let mut groups = BTreeMap::new();
            groups.insert("10".to_owned(), wire_group("Attic", &["7"], "Room"));
            groups.insert("2".to_owned(), wire_group("Kitchen", &["5", "3"], "Room"));

            let mut lights = BTreeMap::new();
            lights.insert("3".to_owned(), wire_light("Counter", true, 100));
            lights.insert("5".to_owned(), wire_light("Ceiling", false, 0));
            lights.insert("7".to_owned(), wire_light("Bulb", true, 254));

            let rooms = assemble(groups, &lights);
            assert_eq!(rooms.len(), 2);
            assert_eq!(rooms[0].name, "Kitchen", "2 sorts before 10");
            let names: Vec<_> = rooms[0].lights.iter().map(|l| l.name.as_str()).collect();
            assert_eq!(names, vec!["Ceiling", "Counter"], "group member order kept");
        }

        #[test]
        fn non_room_groups_are_dropped() {
            let mut groups = BTreeMap::new();
            groups.insert("1".to_owned(), wire_group("Zone", &[], "Zone"));
            groups.insert("2".to_owned(), wire_group("Kitchen", &[], "Room"));

            let rooms = assemble(groups, &BTreeMap::new());
            assert_eq!(rooms.len(), 1);
            assert_eq!(rooms[0].name, "Kitchen");
        }

        #[test]
        fn dangling_member_ids_are_skipped() {
            let mut groups = BTreeMap::new();
            groups.insert("1".to_owned(), wire_group("Kitchen", &["3", "99"], "Room"));

            let mut lights = BTreeMap::new();
            lights.insert("3".to_owned(), wire_light("Lamp", true, 10));

            let rooms = assemble(groups, &lights);
            assert_eq!(rooms[0].lights.len(), 1);
        }
    }
}
