use bevy::prelude::*;

use crate::config::tuning::Tuning;
use crate::game::components::PlayerControlled;
use crate::game::events::ControlMessage;
use crate::game::intent::Intent;

/// Keyboard binding layer: samples intents in Update, consumed by the core
/// in FixedUpdate.
pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (read_axis_input, read_control_input, tuning_reload_input),
        );
    }
}

/// Continuous axes: WASD moves, arrow keys look.
fn read_axis_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut query: Query<&mut Intent, With<PlayerControlled>>,
) {
    let mut move_axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyW) {
        move_axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) {
        move_axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) {
        move_axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyA) {
        move_axis.x -= 1.0;
    }

    let mut look_axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::ArrowRight) {
        look_axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowLeft) {
        look_axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowUp) {
        look_axis.y += 1.0;
    }
    if keyboard.pressed(KeyCode::ArrowDown) {
        look_axis.y -= 1.0;
    }

    for mut intent in &mut query {
        intent.move_axis = move_axis;
        intent.look_axis = look_axis;
    }
}

/// Discrete triggers: Space jumps, Shift edges toggle boost, E dashes.
fn read_control_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut messages: MessageWriter<ControlMessage>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        messages.write(ControlMessage::JumpStart);
    }
    if keyboard.just_released(KeyCode::Space) {
        messages.write(ControlMessage::JumpStop);
    }
    if keyboard.just_pressed(KeyCode::ShiftLeft) {
        messages.write(ControlMessage::BoostStart);
    }
    if keyboard.just_released(KeyCode::ShiftLeft) {
        messages.write(ControlMessage::BoostEnd);
    }
    if keyboard.just_pressed(KeyCode::KeyE) {
        messages.write(ControlMessage::DashTrigger);
    }
}

/// Reload tuning with F5.
fn tuning_reload_input(keyboard: Res<ButtonInput<KeyCode>>, mut tuning: ResMut<Tuning>) {
    if keyboard.just_pressed(KeyCode::F5) {
        tuning.reload();
    }
}
