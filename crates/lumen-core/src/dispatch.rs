//! Action dispatch: apply one action to one resolved target.
//!
//! A dispatch has exactly one outcome. Rooms go through the group action
//! endpoint, lights through the light state endpoint; there is no partial
//! success and no retry.

use tracing::debug;

use lumen_api::color::rgb_to_xy;
use lumen_api::{BridgeClient, StateUpdate};

use crate::error::CoreError;
use crate::model::{Action, Target, MAX_BRIGHTNESS};

/// Translate an action into the partial state write sent to the bridge.
///
/// `TurnOn` and `SetColor` unconditionally reset brightness to the maximum;
/// `TurnOff` carries only the power field so brightness and color stay
/// untouched on the device.
pub fn state_update_for(action: &Action) -> StateUpdate {
    match action {
        Action::TurnOn => StateUpdate::on().with_brightness(MAX_BRIGHTNESS),
        Action::TurnOff => StateUpdate::off(),
        Action::SetColor(rgb) => StateUpdate::on()
            .with_brightness(MAX_BRIGHTNESS)
            .with_xy(rgb_to_xy(rgb.r, rgb.g, rgb.b)),
    }
}

/// Apply `action` to `target` on the bridge.
pub async fn dispatch(
    client: &BridgeClient,
    target: Target<'_>,
    action: &Action,
) -> Result<(), CoreError> {
    let update = state_update_for(action);

    match target {
        Target::Room(room) => {
            debug!(room = %room.name, ?action, "dispatching group action");
            client
                .set_group_state(&room.id, &update)
                .await
                .map_err(|e| CoreError::command_failed(&room.name, e))
        }
        Target::Light(light) => {
            debug!(light = %light.name, ?action, "dispatching light state");
            client
                .set_light_state(&light.id, &update)
                .await
                .map_err(|e| CoreError::command_failed(&light.name, e))
        }
    }
}
