//! Keyboard controls for the cloth coefficients and run state.

use bevy::{app::AppExit, prelude::*};

use super::physics_config::Tunable;
use super::ClothCommand;
use crate::resources::ClothParams;

/// What a key press does.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum KeyAction {
    Command(ClothCommand),
    Scale(Tunable, f64),
    Quit,
}

/// Step used by the W, G and T keys.
const FINE_STEP: f64 = 1.1;
/// Step used by Insert/Delete, Home/End, PageUp/PageDown with Shift held.
const COARSE_STEP: f64 = 1.5;

/// Map a key press (with Shift state) to an action.
pub fn key_action(key: KeyCode, shift: bool) -> Option<KeyAction> {
    let step = if shift { COARSE_STEP } else { FINE_STEP };
    let up_or_down = |t: Tunable| {
        if shift {
            KeyAction::Scale(t, FINE_STEP)
        } else {
            KeyAction::Scale(t, 1.0 / FINE_STEP)
        }
    };

    let action = match key {
        KeyCode::Space => KeyAction::Command(ClothCommand::Toggle),
        KeyCode::KeyR if shift => KeyAction::Command(ClothCommand::Reset),
        KeyCode::KeyQ => KeyAction::Quit,
        KeyCode::KeyW => up_or_down(Tunable::WindForce),
        KeyCode::KeyG => up_or_down(Tunable::Gravity),
        KeyCode::KeyT => up_or_down(Tunable::TimeScale),
        KeyCode::Insert => KeyAction::Scale(Tunable::WindForce, step),
        KeyCode::Delete => KeyAction::Scale(Tunable::WindForce, 1.0 / step),
        KeyCode::Home => KeyAction::Scale(Tunable::WindCycle, step),
        KeyCode::End => KeyAction::Scale(Tunable::WindCycle, 1.0 / step),
        KeyCode::PageUp => KeyAction::Scale(Tunable::Stiffness, step),
        KeyCode::PageDown => KeyAction::Scale(Tunable::Stiffness, 1.0 / step),
        _ => return None,
    };
    Some(action)
}

/// System translating key presses into coefficient edits and cloth commands.
pub fn handle_cloth_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut params: ResMut<ClothParams>,
    mut commands: EventWriter<ClothCommand>,
    mut exit: EventWriter<AppExit>,
) {
    let shift = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);

    for &key in keyboard.get_just_pressed() {
        match key_action(key, shift) {
            Some(KeyAction::Command(command)) => {
                commands.send(command);
            }
            Some(KeyAction::Scale(tunable, factor)) => {
                let value = params.scale(tunable, factor);
                info!("{} = {:.3}", tunable.name(), value);
            }
            Some(KeyAction::Quit) => {
                exit.send(AppExit::Success);
            }
            None => {}
        }
    }
}
