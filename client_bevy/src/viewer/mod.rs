//! Standalone glTF model viewer with mouse orbit controls.

mod orbit;

pub use orbit::{OrbitSettings, OrbitState};

use bevy::asset::LoadState;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::constants::{color_from_hex, Colors, VIEWER_AMBIENT_BRIGHTNESS};

pub const DEFAULT_SCENE: &str = "helico.glb";

const CAMERA_FOV_DEGREES: f32 = 45.0;
const CAMERA_POSITION: Vec3 = Vec3::new(0.0, 0.0, 4.0);
const MODEL_SCALE: f32 = 0.07;
/// Pixel-based wheel deltas (touchpads, browsers) per scroll line.
const PIXELS_PER_LINE: f32 = 100.0;

pub struct ViewerPlugin {
    /// Asset path of the glTF file to show.
    pub scene_path: String,
}

#[derive(Component)]
pub struct OrbitCamera(pub OrbitState);

#[derive(Resource)]
struct ViewerScene {
    path: String,
    handle: Option<Handle<Scene>>,
    reported: bool,
}

impl Plugin for ViewerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(color_from_hex(Colors::BACKGROUND)))
            .insert_resource(ViewerScene {
                path: self.scene_path.clone(),
                handle: None,
                reported: false,
            })
            .add_systems(Startup, (setup_viewer_camera, load_model))
            .add_systems(
                Update,
                (orbit_input_system, apply_orbit_system, report_model_load).chain(),
            );
    }
}

fn setup_viewer_camera(mut commands: Commands) {
    let orbit = OrbitState::from_position(CAMERA_POSITION, Vec3::ZERO, OrbitSettings::default());
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(orbit.eye()).looking_at(orbit.target, Vec3::Y),
        AmbientLight {
            color: color_from_hex(Colors::VIEWER_AMBIENT),
            brightness: VIEWER_AMBIENT_BRIGHTNESS,
            ..default()
        },
        OrbitCamera(orbit),
    ));
}

fn load_model(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut scene: ResMut<ViewerScene>,
) {
    info!("loading model {}", scene.path);
    let handle: Handle<Scene> =
        asset_server.load(GltfAssetLabel::Scene(0).from_asset(scene.path.clone()));
    commands.spawn((
        SceneRoot(handle.clone()),
        Transform::from_scale(Vec3::splat(MODEL_SCALE)),
    ));
    scene.handle = Some(handle);
}

fn report_model_load(asset_server: Res<AssetServer>, mut scene: ResMut<ViewerScene>) {
    if scene.reported {
        return;
    }
    let Some(handle) = &scene.handle else {
        return;
    };
    match asset_server.load_state(handle) {
        LoadState::Loaded => {
            info!("model {} loaded", scene.path);
            scene.reported = true;
        }
        LoadState::Failed(err) => {
            error!("model {} failed to load: {err}", scene.path);
            scene.reported = true;
        }
        LoadState::NotLoaded | LoadState::Loading => {}
    }
}

fn orbit_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    mut q_camera: Query<(&mut OrbitCamera, &Projection)>,
) {
    let Ok(window) = q_window.single() else {
        return;
    };
    let height = window.height();

    for (mut orbit, projection) in &mut q_camera {
        if motion.delta != Vec2::ZERO {
            if buttons.pressed(MouseButton::Left) {
                orbit.0.rotate(motion.delta, height);
            } else if buttons.pressed(MouseButton::Right) {
                let fov = match projection {
                    Projection::Perspective(p) => p.fov,
                    _ => CAMERA_FOV_DEGREES.to_radians(),
                };
                orbit.0.pan(motion.delta, height, fov);
            }
        }

        if scroll.delta.y != 0.0 {
            let lines = match scroll.unit {
                MouseScrollUnit::Line => scroll.delta.y,
                MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
            };
            orbit.0.zoom(lines);
        }
    }
}

fn apply_orbit_system(mut q_camera: Query<(&mut OrbitCamera, &mut Transform)>) {
    for (mut orbit, mut transform) in &mut q_camera {
        orbit.0.update();
        *transform = Transform::from_translation(orbit.0.eye()).looking_at(orbit.0.target, Vec3::Y);
    }
}
