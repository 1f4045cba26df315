use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};
use bevy_rapier3d::prelude::*;

use bowling_client::constants::{GAME_CANVAS, GAME_WINDOW_HEIGHT, GAME_WINDOW_WIDTH};
use bowling_client::game::{
    BallPlugin, CorePlugin, DeckPlugin, HudPlugin, InputPlugin, PhysicsSyncPlugin, PinsPlugin,
    ThrowPlugin,
};
use bowling_client::settings::game_config_from_env_or_location;

fn main() {
    let (config, config_warning) = game_config_from_env_or_location();

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bowling".to_string(),
                resolution: WindowResolution::new(GAME_WINDOW_WIDTH, GAME_WINDOW_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                resizable: true,
                canvas: Some(GAME_CANVAS.to_string()),
                fit_canvas_to_parent: true,
                prevent_default_event_handling: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
        .add_plugins(RapierDebugRenderPlugin {
            enabled: false,
            ..default()
        })
        .add_plugins(CorePlugin {
            config,
            config_warning,
        })
        .add_plugins(DeckPlugin)
        .add_plugins(BallPlugin)
        .add_plugins(PinsPlugin)
        .add_plugins(ThrowPlugin)
        .add_plugins(InputPlugin)
        .add_plugins(PhysicsSyncPlugin)
        .add_plugins(HudPlugin)
        .run();
}
