//! Per-step bridge between the Rapier world and the lane rules.
//!
//! Rapier writes body poses back into `Transform` after every fixed step, and
//! the render meshes (or their glTF children) ride on those transforms. Once
//! that has happened we tell the lane what the step produced and publish its
//! answer for the spawn systems.

use bevy::prelude::*;
use bevy_transform_interpolation::prelude::TransformInterpolationPlugin;
use bowling_shared::lane::LaneObservation;

use crate::settings::GameSettings;

use super::ball::Ball;
use super::core::{LaneEventMessage, LaneState};
use super::pins::{count_standing, Downed, Pin};
use super::FixedSet;

pub struct PhysicsSyncPlugin;

impl Plugin for PhysicsSyncPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TransformInterpolationPlugin::default())
            .add_systems(
                FixedUpdate,
                update_physics_system.in_set(FixedSet::PostPhysics),
            );
    }
}

pub(crate) fn update_physics_system(
    settings: Res<GameSettings>,
    time: Res<Time<Fixed>>,
    mut lane: ResMut<LaneState>,
    q_ball: Query<&Transform, With<Ball>>,
    q_pins: Query<&Transform, (With<Pin>, Without<Downed>)>,
    mut events: MessageWriter<LaneEventMessage>,
) {
    let ball_out = q_ball
        .iter()
        .any(|t| t.translation.y < settings.ball.out_of_play_y);
    let observed = LaneObservation {
        ball_out,
        standing_pins: count_standing(&settings.pins, &q_pins),
    };

    for command in lane.tick(time.delta_secs(), observed) {
        events.write(LaneEventMessage(command));
    }
}
