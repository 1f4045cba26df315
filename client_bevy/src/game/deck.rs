use std::f32::consts::FRAC_PI_2;

use bevy::image::{ImageAddressMode, ImageLoaderSettings, ImageSampler, ImageSamplerDescriptor};
use bevy::math::Affine2;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::constants::{color_from_hex, Colors, LANE_FRICTION, LANE_RESTITUTION};
use crate::settings::GameSettings;

use super::vec3;

pub struct DeckPlugin;

impl Plugin for DeckPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_deck);
    }
}

/// Texture coordinates for the floor: tiled, then turned to run along the lane.
pub(crate) fn floor_uv_transform(repeat: [f32; 2]) -> Affine2 {
    Affine2::from_angle(FRAC_PI_2) * Affine2::from_scale(Vec2::from_array(repeat))
}

fn spawn_deck(
    mut commands: Commands,
    settings: Res<GameSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let lane = &settings.lane;
    let size = vec3(lane.size);
    let half = size * 0.5;

    let texture = lane.texture.clone().map(|path| {
        asset_server.load_with_settings(path, |s: &mut ImageLoaderSettings| {
            s.sampler = ImageSampler::Descriptor(ImageSamplerDescriptor {
                address_mode_u: ImageAddressMode::Repeat,
                address_mode_v: ImageAddressMode::Repeat,
                ..default()
            });
        })
    });
    let material = match texture {
        Some(texture) => StandardMaterial {
            base_color_texture: Some(texture),
            uv_transform: floor_uv_transform(lane.texture_repeat),
            unlit: true,
            ..default()
        },
        None => StandardMaterial {
            base_color: color_from_hex(Colors::LANE),
            perceptual_roughness: 0.6,
            ..default()
        },
    };

    commands.spawn((
        RigidBody::Fixed,
        Collider::cuboid(half.x, half.y, half.z),
        Friction::coefficient(LANE_FRICTION),
        Restitution::coefficient(LANE_RESTITUTION),
        Transform::from_translation(vec3(lane.center)),
        Mesh3d(meshes.add(Cuboid::new(size.x, size.y, size.z))),
        MeshMaterial3d(materials.add(material)),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_texture_runs_along_the_lane() {
        let uv = floor_uv_transform([3.0, 0.5]);
        // unit u maps onto v after the quarter turn
        let p = uv.transform_point2(Vec2::X);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 3.0).abs() < 1e-5);
    }
}
