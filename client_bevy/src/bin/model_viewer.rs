use bevy::prelude::*;
use bevy::window::{PresentMode, WindowResolution};

use bowling_client::constants::{VIEWER_CANVAS, VIEWER_WINDOW_HEIGHT, VIEWER_WINDOW_WIDTH};
use bowling_client::viewer::{ViewerPlugin, DEFAULT_SCENE};

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Model viewer".to_string(),
                resolution: WindowResolution::new(VIEWER_WINDOW_WIDTH, VIEWER_WINDOW_HEIGHT),
                present_mode: PresentMode::AutoVsync,
                canvas: Some(VIEWER_CANVAS.to_string()),
                prevent_default_event_handling: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins(ViewerPlugin {
            scene_path: scene_path_from_args_or_env(),
        })
        .run();
}

#[cfg(not(target_arch = "wasm32"))]
fn scene_path_from_args_or_env() -> String {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MODEL_VIEWER_SCENE").ok())
        .unwrap_or_else(|| DEFAULT_SCENE.to_string())
}

#[cfg(target_arch = "wasm32")]
fn scene_path_from_args_or_env() -> String {
    let search = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    url::form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "scene")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| DEFAULT_SCENE.to_string())
}
