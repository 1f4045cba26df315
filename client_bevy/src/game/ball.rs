use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_transform_interpolation::prelude::*;
use bevy_transform_interpolation::{RotationEasingState, TranslationEasingState};
use bowling_shared::lane::LaneCommand;

use crate::constants::{color_from_hex, Colors, BALL_FRICTION, BALL_RESTITUTION};
use crate::settings::GameSettings;

use super::core::LaneEventMessage;
use super::{vec3, FixedSet};

pub struct BallPlugin;

#[derive(Component)]
pub(crate) struct Ball;

impl Plugin for BallPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_ball)
            .add_systems(FixedUpdate, reset_ball_system.in_set(FixedSet::Spawn));
    }
}

fn spawn_ball(
    mut commands: Commands,
    settings: Res<GameSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ball = &settings.ball;
    let texture = ball.texture.clone().map(|path| asset_server.load(path));
    let base_color = if texture.is_some() {
        Color::WHITE
    } else {
        color_from_hex(Colors::BALL)
    };

    commands.spawn((
        // Physics
        RigidBody::Dynamic,
        Collider::ball(ball.radius),
        ColliderMassProperties::Mass(ball.mass),
        Friction::coefficient(BALL_FRICTION),
        Restitution::coefficient(BALL_RESTITUTION),
        Sleeping::disabled(),
        Ccd::enabled(),
        Velocity::zero(),
        ExternalImpulse::default(),
        // Transform (shared by physics + visual)
        Transform::from_translation(vec3(ball.spawn)),
        TransformInterpolation,
        // Visual
        Mesh3d(meshes.add(Sphere::new(ball.radius).mesh().uv(20, 20))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color,
            base_color_texture: texture,
            perceptual_roughness: 0.35,
            ..default()
        })),
        Ball,
    ));
}

/// Put the ball back at the foul line, at rest and unaimed.
pub(super) fn reset_ball_system(
    settings: Res<GameSettings>,
    mut events: MessageReader<LaneEventMessage>,
    mut q_ball: Query<
        (
            &mut Transform,
            &mut Velocity,
            Option<&mut TranslationEasingState>,
            Option<&mut RotationEasingState>,
        ),
        With<Ball>,
    >,
) {
    let resets = events
        .read()
        .filter(|msg| msg.0 == LaneCommand::ResetBall)
        .count();
    if resets == 0 {
        return;
    }

    let spawn = Transform::from_translation(vec3(settings.ball.spawn));
    for (mut transform, mut velocity, translation_easing, rotation_easing) in &mut q_ball {
        *transform = spawn;
        *velocity = Velocity::zero();
        // Teleport: ease from the spawn point, not from where the ball fell off.
        if let Some(mut easing) = translation_easing {
            easing.start = Some(spawn.translation);
        }
        if let Some(mut easing) = rotation_easing {
            easing.start = Some(spawn.rotation);
        }
    }
}
