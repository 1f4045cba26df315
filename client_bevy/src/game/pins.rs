use std::f32::consts::TAU;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use bevy_transform_interpolation::prelude::*;
use bowling_shared::config::PinConfig;
use bowling_shared::lane::LaneCommand;
use bowling_shared::rack::{is_pin_down, rack_positions};

use crate::constants::{color_from_hex, Colors, PIN_FRICTION, PIN_RESTITUTION, PIN_SEGMENTS};
use crate::settings::GameSettings;

use super::core::LaneEventMessage;
use super::{vec3, FixedSet};

pub struct PinsPlugin;

#[derive(Component)]
pub(crate) struct Pin;

/// A knocked-down pin waiting to be cleared off the lane.
#[derive(Component)]
pub(crate) struct Downed {
    pub(crate) seconds_left: f32,
}

/// Shared render assets so a rerack does not rebuild meshes.
#[derive(Resource, Clone)]
pub(crate) struct PinAssets {
    mesh: Handle<Mesh>,
    material: Handle<StandardMaterial>,
    scene: Option<Handle<Scene>>,
    collider: Collider,
}

impl Plugin for PinsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_pins)
            .add_systems(
                FixedUpdate,
                (mark_downed_pins, remove_downed_pins)
                    .chain()
                    .in_set(FixedSet::PostPhysics)
                    .before(super::physics::update_physics_system),
            )
            .add_systems(FixedUpdate, rerack_system.in_set(FixedSet::Spawn));
    }
}

/// Outline of a pin as a truncated cone around the local Y axis.
pub(crate) fn frustum_points(config: &PinConfig, segments: u32) -> Vec<Vec3> {
    let half = config.height * 0.5;
    let mut points = Vec::with_capacity(segments as usize * 2);
    for i in 0..segments {
        let angle = TAU * i as f32 / segments as f32;
        let (sin, cos) = angle.sin_cos();
        points.push(Vec3::new(cos * config.bottom_radius, -half, sin * config.bottom_radius));
        points.push(Vec3::new(cos * config.top_radius, half, sin * config.top_radius));
    }
    points
}

fn pin_collider(config: &PinConfig) -> Collider {
    Collider::convex_hull(&frustum_points(config, PIN_SEGMENTS)).unwrap_or_else(|| {
        warn!("pin hull could not be built, using a cylinder");
        Collider::cylinder(config.height * 0.5, config.bottom_radius)
    })
}

fn setup_pins(
    mut commands: Commands,
    settings: Res<GameSettings>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = &settings.pins;
    let assets = PinAssets {
        mesh: meshes.add(
            ConicalFrustum {
                radius_top: config.top_radius,
                radius_bottom: config.bottom_radius,
                height: config.height,
            }
            .mesh()
            .resolution(PIN_SEGMENTS),
        ),
        material: materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::PIN),
            perceptual_roughness: 0.3,
            ..default()
        }),
        scene: config
            .model
            .clone()
            .map(|path| asset_server.load(GltfAssetLabel::Scene(0).from_asset(path))),
        collider: pin_collider(config),
    };

    spawn_rack(&mut commands, config, &assets);
    commands.insert_resource(assets);
}

/// Set up a full rack.
pub(crate) fn spawn_rack(commands: &mut Commands, config: &PinConfig, assets: &PinAssets) {
    for position in rack_positions(config) {
        let mut pin = commands.spawn((
            RigidBody::Dynamic,
            assets.collider.clone(),
            ColliderMassProperties::Mass(config.mass),
            Friction::coefficient(PIN_FRICTION),
            Restitution::coefficient(PIN_RESTITUTION),
            Sleeping {
                normalized_linear_threshold: config.sleep_linear_threshold,
                angular_threshold: config.sleep_angular_threshold,
                sleeping: false,
            },
            Velocity::zero(),
            Transform::from_translation(vec3(position)),
            TransformInterpolation,
            Visibility::default(),
            Pin,
        ));

        match &assets.scene {
            Some(scene) => {
                pin.with_child((
                    SceneRoot(scene.clone()),
                    Transform::from_translation(Vec3::new(0.0, -config.height * 0.5, 0.0))
                        .with_scale(Vec3::splat(config.model_scale)),
                ));
            }
            None => {
                pin.insert((
                    Mesh3d(assets.mesh.clone()),
                    MeshMaterial3d(assets.material.clone()),
                ));
            }
        }
    }
}

fn mark_downed_pins(
    mut commands: Commands,
    settings: Res<GameSettings>,
    q_pins: Query<(Entity, &Transform), (With<Pin>, Without<Downed>)>,
) {
    for (entity, transform) in &q_pins {
        if is_pin_down(transform.translation.y, &settings.pins) {
            commands.entity(entity).insert(Downed {
                seconds_left: settings.pins.removal_delay,
            });
        }
    }
}

fn remove_downed_pins(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut q_downed: Query<(Entity, &mut Downed)>,
) {
    let dt = time.delta_secs();
    for (entity, mut downed) in &mut q_downed {
        downed.seconds_left -= dt;
        if downed.seconds_left <= 0.0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Number of pins still upright.
pub(crate) fn count_standing<'a>(
    config: &PinConfig,
    heights: impl IntoIterator<Item = &'a Transform>,
) -> u32 {
    heights
        .into_iter()
        .filter(|t| !is_pin_down(t.translation.y, config))
        .count() as u32
}

fn rerack_system(
    mut commands: Commands,
    settings: Res<GameSettings>,
    assets: Option<Res<PinAssets>>,
    mut events: MessageReader<LaneEventMessage>,
    q_pins: Query<Entity, With<Pin>>,
) {
    let reracks = events
        .read()
        .filter(|msg| msg.0 == LaneCommand::Rerack)
        .count();
    if reracks == 0 {
        return;
    }
    let Some(assets) = assets else {
        return;
    };

    for entity in &q_pins {
        commands.entity(entity).despawn();
    }
    spawn_rack(&mut commands, &settings.pins, &assets);
    debug!("pins reracked");
}

#[cfg(test)]
mod tests {
    use bowling_shared::rack::rack_size;

    use super::*;

    #[test]
    fn frustum_is_wider_at_the_base() {
        let config = PinConfig::default();
        let points = frustum_points(&config, PIN_SEGMENTS);
        assert_eq!(points.len(), 20);
        for pair in points.chunks(2) {
            let base = Vec2::new(pair[0].x, pair[0].z).length();
            let top = Vec2::new(pair[1].x, pair[1].z).length();
            assert!((base - config.bottom_radius).abs() < 1e-6);
            assert!((top - config.top_radius).abs() < 1e-6);
            assert!((pair[1].y - pair[0].y - config.height).abs() < 1e-6);
        }
    }

    #[test]
    fn standing_count_ignores_fallen_pins() {
        let config = PinConfig::default();
        let transforms = [
            Transform::from_xyz(0.0, config.y, -20.0),
            Transform::from_xyz(0.16, config.y, -20.24),
            Transform::from_xyz(-0.16, -0.25, -20.24),
            Transform::from_xyz(0.0, -4.0, -22.0),
        ];
        assert_eq!(count_standing(&config, &transforms), 2);
    }

    #[test]
    fn rerack_replaces_every_pin_with_a_full_rack() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameSettings::default());
        app.insert_resource(PinAssets {
            mesh: Handle::default(),
            material: Handle::default(),
            scene: None,
            collider: Collider::ball(0.05),
        });
        app.add_message::<LaneEventMessage>();
        app.add_systems(Update, rerack_system);

        let standing = app
            .world_mut()
            .spawn((Pin, Transform::from_xyz(0.16, -0.1, -20.24)))
            .id();
        let fallen = app
            .world_mut()
            .spawn((
                Pin,
                Transform::from_xyz(-0.3, -0.26, -20.6),
                Downed { seconds_left: 0.4 },
            ))
            .id();
        app.world_mut()
            .write_message(LaneEventMessage(LaneCommand::Rerack));

        app.update();

        assert!(app.world().get_entity(standing).is_err());
        assert!(app.world().get_entity(fallen).is_err());
        let config = PinConfig::default();
        let mut q_pins = app.world_mut().query_filtered::<&Transform, With<Pin>>();
        let mut positions: Vec<Vec3> = q_pins.iter(app.world()).map(|t| t.translation).collect();
        assert_eq!(positions.len(), rack_size(config.rows) as usize);
        positions.sort_by(|a, b| b.z.total_cmp(&a.z).then(a.x.total_cmp(&b.x)));
        assert_eq!(positions[0], vec3(rack_positions(&config)[0]));
        let mut q_downed = app.world_mut().query_filtered::<(), With<Downed>>();
        assert_eq!(q_downed.iter(app.world()).count(), 0);
    }

    #[test]
    fn low_pins_are_marked_downed() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameSettings::default());
        app.add_systems(Update, mark_downed_pins);

        let upright = app
            .world_mut()
            .spawn((Pin, Transform::from_xyz(0.0, -0.1, -20.0)))
            .id();
        let fallen = app
            .world_mut()
            .spawn((Pin, Transform::from_xyz(0.3, -0.26, -20.5)))
            .id();

        app.update();

        assert!(app.world().get::<Downed>(upright).is_none());
        let downed = app.world().get::<Downed>(fallen).unwrap();
        assert!((downed.seconds_left - 1.0).abs() < 1e-6);
    }
}
