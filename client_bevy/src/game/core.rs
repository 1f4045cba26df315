use std::num::NonZeroUsize;

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bowling_shared::config::GameConfig;
use bowling_shared::lane::{Lane, LaneCommand};

use crate::constants::{
    color_from_hex, Colors, GAME_AMBIENT_BRIGHTNESS, KEY_LIGHT_ILLUMINANCE, KEY_LIGHT_POSITIONS,
};
use crate::settings::GameSettings;

use super::ball::Ball;
use super::input::InputState;
use super::vec3;

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum UpdateSet {
    Input,
    Visuals,
}

#[derive(SystemSet, Debug, Hash, Eq, PartialEq, Clone)]
pub(crate) enum FixedSet {
    Simulate,
    PostPhysics,
    Spawn,
}

/// Commands from the lane rules, applied to the world after each physics step.
#[derive(Message, Clone, Copy, Debug)]
pub struct LaneEventMessage(pub LaneCommand);

#[derive(Resource, Deref, DerefMut)]
pub(crate) struct LaneState(pub(crate) Lane);

pub struct CorePlugin {
    pub config: GameConfig,
    /// Why the configured settings were rejected, if they were.
    pub config_warning: Option<String>,
}

#[derive(Component)]
pub(crate) struct MainCamera;

/// Directional light that keeps pointing at the ball.
#[derive(Component)]
struct BallTrackingLight;

#[derive(Resource)]
struct ConfigWarning(Option<String>);

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let physics = &self.config.physics;
        app.insert_resource(GameSettings(self.config.clone()))
            .insert_resource(LaneState(Lane::new(&self.config)))
            .insert_resource(ConfigWarning(self.config_warning.clone()))
            .init_resource::<InputState>()
            .add_message::<LaneEventMessage>()
            .insert_resource(ClearColor(color_from_hex(Colors::BACKGROUND)))
            .insert_resource(Time::<Fixed>::from_seconds(physics.dt as f64))
            .insert_resource(TimestepMode::Fixed {
                dt: physics.dt,
                substeps: physics.substeps,
            })
            .configure_sets(Update, (UpdateSet::Input, UpdateSet::Visuals).chain())
            .configure_sets(
                FixedUpdate,
                (FixedSet::Simulate, FixedSet::PostPhysics, FixedSet::Spawn).chain(),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::Simulate.before(PhysicsSet::SyncBackend),
            )
            .configure_sets(
                FixedUpdate,
                FixedSet::PostPhysics.after(PhysicsSet::Writeback),
            )
            .add_systems(
                Startup,
                (report_config_warning, setup_camera, setup_lights, configure_rapier),
            )
            .add_systems(
                Update,
                (follow_ball_camera, track_ball_lights).in_set(UpdateSet::Visuals),
            );
    }
}

fn report_config_warning(warning: Res<ConfigWarning>) {
    if let Some(reason) = &warning.0 {
        warn!("using default game settings: {reason}");
    }
}

fn setup_camera(mut commands: Commands, settings: Res<GameSettings>) {
    // WebGL2 MSAA is expensive (often CPU fallback).
    #[cfg(target_arch = "wasm32")]
    let msaa = Msaa::Off;
    #[cfg(not(target_arch = "wasm32"))]
    let msaa = Msaa::Sample4;

    let camera = &settings.camera;
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Tonemapping::None,
        Transform::from_translation(vec3(camera.position))
            .looking_at(vec3(settings.ball.spawn), Vec3::Y),
        AmbientLight {
            color: color_from_hex(Colors::AMBIENT),
            brightness: GAME_AMBIENT_BRIGHTNESS,
            ..default()
        },
        msaa,
        MainCamera,
    ));
}

fn setup_lights(mut commands: Commands, settings: Res<GameSettings>) {
    let target = vec3(settings.ball.spawn);
    for position in KEY_LIGHT_POSITIONS {
        commands.spawn((
            DirectionalLight {
                illuminance: KEY_LIGHT_ILLUMINANCE,
                shadows_enabled: true,
                ..default()
            },
            Transform::from_translation(vec3(position)).looking_at(target, Vec3::Y),
            BallTrackingLight,
        ));
    }
}

fn configure_rapier(
    settings: Res<GameSettings>,
    mut q_context: Query<(&mut RapierConfiguration, &mut RapierContextSimulation)>,
) {
    let physics = &settings.physics;
    for (mut cfg, mut simulation) in &mut q_context {
        cfg.gravity = vec3(physics.gravity);
        if let Some(iterations) = NonZeroUsize::new(physics.solver_iterations) {
            simulation.integration_parameters.num_solver_iterations = iterations.get();
        }
    }
}

fn follow_ball_camera(
    settings: Res<GameSettings>,
    q_ball: Query<&Transform, (With<Ball>, Without<MainCamera>)>,
    mut q_camera: Query<&mut Transform, (With<MainCamera>, Without<Ball>)>,
) {
    let Ok(ball) = q_ball.single() else {
        return;
    };
    for mut camera in &mut q_camera {
        camera.translation.z = settings.camera.follow_z(ball.translation.z);
    }
}

fn track_ball_lights(
    q_ball: Query<&Transform, (With<Ball>, Without<BallTrackingLight>)>,
    mut q_lights: Query<&mut Transform, (With<BallTrackingLight>, Without<Ball>)>,
) {
    let Ok(ball) = q_ball.single() else {
        return;
    };
    for mut light in &mut q_lights {
        light.look_at(ball.translation, Vec3::Y);
    }
}
