//! Controls plugin - turns raw key presses into intents and routes them by game phase.

use bevy::prelude::*;

use crate::game::{Direction, GameCommand, Intent, PlayState};

/// Plugin for keyboard handling.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, read_keyboard.in_set(ControlsSet));
    }
}

/// Systems that feed the command queue from user input.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct ControlsSet;

/// What an intent amounts to in the current phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    Start,
    Steer(Direction),
    Reset,
}

/// Maps a key to its logical intent. Arrow keys and WASD steer, R reloads.
pub fn key_to_intent(key: KeyCode) -> Option<Intent> {
    match key {
        KeyCode::ArrowLeft | KeyCode::KeyA => Some(Intent::Move(Direction::Left)),
        KeyCode::ArrowRight | KeyCode::KeyD => Some(Intent::Move(Direction::Right)),
        KeyCode::ArrowUp | KeyCode::KeyW => Some(Intent::Move(Direction::Up)),
        KeyCode::ArrowDown | KeyCode::KeyS => Some(Intent::Move(Direction::Down)),
        KeyCode::KeyR => Some(Intent::Reload),
        _ => None,
    }
}

/// Applies the lifecycle rules: any movement key starts a fresh round, steers a running one,
/// and is ignored after game over until a reload.
pub fn route(intent: Intent, state: PlayState) -> Option<Action> {
    match (intent, state) {
        (Intent::Move(_), PlayState::NotStarted) => Some(Action::Start),
        (Intent::Move(direction), PlayState::Playing) => Some(Action::Steer(direction)),
        (Intent::Reload, PlayState::GameOver) => Some(Action::Reset),
        _ => None,
    }
}

/// System to queue an intent for every key pressed this frame.
fn read_keyboard(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut command_writer: MessageWriter<GameCommand>,
) {
    for key in keyboard_input.get_just_pressed() {
        if let Some(intent) = key_to_intent(*key) {
            command_writer.write(GameCommand::Intent(intent));
        }
    }
}
