use bevy::prelude::*;
use bevy_rapier3d::render::DebugRenderContext;
use bowling_shared::aim::AimInput;

use super::UpdateSet;

pub struct InputPlugin;

/// Presses collected every frame and consumed by the next physics step.
#[derive(Resource, Default)]
pub(crate) struct InputState {
    pub(crate) throw: bool,
    pub(crate) restart: bool,
    pub(crate) nudges: Vec<AimInput>,
}

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (input_system, toggle_debug_render).in_set(UpdateSet::Input),
        );
    }
}

pub(crate) fn aim_input_for(key: KeyCode) -> Option<AimInput> {
    match key {
        KeyCode::ArrowLeft => Some(AimInput::Left),
        KeyCode::ArrowRight => Some(AimInput::Right),
        KeyCode::ArrowUp => Some(AimInput::SpinUp),
        KeyCode::ArrowDown => Some(AimInput::SpinDown),
        _ => None,
    }
}

fn input_system(
    mut input: ResMut<InputState>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    if keys.just_pressed(KeyCode::Space) || mouse.just_pressed(MouseButton::Left) {
        input.throw = true;
    }
    if keys.just_pressed(KeyCode::KeyR) {
        input.restart = true;
    }
    for key in keys.get_just_pressed() {
        if let Some(aim) = aim_input_for(*key) {
            input.nudges.push(aim);
        }
    }
}

fn toggle_debug_render(
    keys: Res<ButtonInput<KeyCode>>,
    debug: Option<ResMut<DebugRenderContext>>,
) {
    if !keys.just_pressed(KeyCode::F1) {
        return;
    }
    if let Some(mut debug) = debug {
        debug.enabled = !debug.enabled;
        let enabled = debug.enabled;
        info!("collider debug render {}", if enabled { "on" } else { "off" });
    }
}
