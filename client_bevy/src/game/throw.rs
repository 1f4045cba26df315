use bevy::prelude::*;
use bevy_rapier3d::prelude::ExternalImpulse;
use bowling_shared::lane::LaneCommand;

use crate::constants::{
    color_from_hex, Colors, AIM_HELPER_REACH, AIM_HELPER_SIZE, AIM_HELPER_Y,
};
use crate::settings::GameSettings;

use super::ball::Ball;
use super::core::{LaneEventMessage, LaneState};
use super::input::InputState;
use super::{vec3, FixedSet, UpdateSet};

pub struct ThrowPlugin;

/// Thin bar on the deck showing where the ball will roll.
#[derive(Component)]
pub(crate) struct AimHelper;

impl Plugin for ThrowPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_aim_helper)
            .add_systems(FixedUpdate, throw_system.in_set(FixedSet::Simulate))
            .add_systems(Update, update_aim_helper.in_set(UpdateSet::Visuals));
    }
}

fn spawn_aim_helper(
    mut commands: Commands,
    settings: Res<GameSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let [w, h, d] = AIM_HELPER_SIZE;
    let mesh = Mesh::from(Cuboid::new(w, h, d)).translated_by(Vec3::new(0.0, 0.0, -AIM_HELPER_REACH));
    let spawn = vec3(settings.ball.spawn);

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: color_from_hex(Colors::AIM_HELPER),
            unlit: true,
            ..default()
        })),
        Transform::from_xyz(spawn.x, AIM_HELPER_Y, spawn.z),
        AimHelper,
    ));
}

fn throw_system(
    settings: Res<GameSettings>,
    mut input: ResMut<InputState>,
    mut lane: ResMut<LaneState>,
    mut q_ball: Query<(&mut Transform, &mut ExternalImpulse), With<Ball>>,
    mut events: MessageWriter<LaneEventMessage>,
) {
    if std::mem::take(&mut input.restart) {
        input.throw = false;
        input.nudges.clear();
        lane.restart();
        events.write(LaneEventMessage(LaneCommand::ResetBall));
        events.write(LaneEventMessage(LaneCommand::Rerack));
        info!("new game");
        return;
    }

    let Ok((mut transform, mut impulse)) = q_ball.single_mut() else {
        input.nudges.clear();
        return;
    };

    let mut aimed = false;
    for nudge in input.nudges.drain(..) {
        aimed |= lane.nudge(nudge);
    }
    if aimed {
        let aim = lane.aim();
        transform.translation.x = settings.ball.spawn[0] + aim.offset_x;
        transform.rotation = Quat::from_rotation_y(aim.ball_yaw());
    }

    if std::mem::take(&mut input.throw) {
        if let Some(throw) = lane.press_throw() {
            impulse.impulse += vec3(throw.impulse);
            info!(
                "ball thrown: power {:.0}, impulse {:?}",
                throw.power, throw.impulse
            );
        }
    }
}

fn update_aim_helper(
    settings: Res<GameSettings>,
    lane: Res<LaneState>,
    mut q_helper: Query<&mut Transform, With<AimHelper>>,
) {
    let aim = lane.aim();
    for mut transform in &mut q_helper {
        transform.translation.x = settings.ball.spawn[0] + aim.offset_x;
        transform.rotation = Quat::from_rotation_y(aim.helper_yaw(&settings.throw));
    }
}

#[cfg(test)]
mod tests {
    use bowling_shared::aim::{AimInput, AimState};
    use bowling_shared::config::GameConfig;
    use bowling_shared::lane::{Lane, LaneObservation, Phase};

    use super::*;

    #[derive(Resource, Default)]
    struct SeenCommands(Vec<LaneCommand>);

    fn record_commands(
        mut events: MessageReader<LaneEventMessage>,
        mut seen: ResMut<SeenCommands>,
    ) {
        seen.0.extend(events.read().map(|msg| msg.0));
    }

    fn make_test_app(lane: Lane, input: InputState) -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(GameSettings::default());
        app.insert_resource(LaneState(lane));
        app.insert_resource(input);
        app.init_resource::<SeenCommands>();
        app.add_message::<LaneEventMessage>();
        app.add_systems(Update, (throw_system, record_commands).chain());
        let ball = app
            .world_mut()
            .spawn((Ball, Transform::default(), ExternalImpulse::default()))
            .id();
        (app, ball)
    }

    #[test]
    fn restart_resets_lane_and_rebuilds_world() {
        let mut lane = Lane::new(&GameConfig::default());
        lane.nudge(AimInput::Left);
        lane.press_throw();
        lane.press_throw();
        let (mut app, ball) = make_test_app(
            lane,
            InputState {
                throw: true,
                restart: true,
                nudges: vec![AimInput::Right],
            },
        );

        app.update();

        assert_eq!(
            app.world().resource::<SeenCommands>().0,
            vec![LaneCommand::ResetBall, LaneCommand::Rerack]
        );
        let lane = app.world().resource::<LaneState>();
        assert_eq!(lane.phase(), Phase::Aiming);
        assert_eq!(lane.aim(), AimState::default());
        assert_eq!(lane.scorecard().current_frame(), 1);
        let input = app.world().resource::<InputState>();
        assert!(!input.restart && !input.throw && input.nudges.is_empty());
        let impulse = app.world().get::<ExternalImpulse>(ball).unwrap();
        assert_eq!(impulse.impulse, Vec3::ZERO);
    }

    #[test]
    fn nudges_move_the_ball_while_aiming() {
        let (mut app, ball) = make_test_app(
            Lane::new(&GameConfig::default()),
            InputState {
                nudges: vec![AimInput::Right, AimInput::SpinUp],
                ..default()
            },
        );

        app.update();

        let throw = GameConfig::default().throw;
        let transform = app.world().get::<Transform>(ball).unwrap();
        assert!((transform.translation.x - throw.lateral_step).abs() < 1e-6);
        let expected = Quat::from_rotation_y(throw.spin_step);
        assert!(transform.rotation.angle_between(expected) < 1e-5);
    }

    #[test]
    fn first_press_charges_without_moving_the_ball() {
        let (mut app, ball) = make_test_app(
            Lane::new(&GameConfig::default()),
            InputState {
                throw: true,
                ..default()
            },
        );

        app.update();

        assert!(matches!(
            app.world().resource::<LaneState>().phase(),
            Phase::Charging(_)
        ));
        let impulse = app.world().get::<ExternalImpulse>(ball).unwrap();
        assert_eq!(impulse.impulse, Vec3::ZERO);
    }

    #[test]
    fn second_press_applies_the_throw_impulse() {
        let mut lane = Lane::new(&GameConfig::default());
        lane.press_throw();
        lane.tick(
            0.3,
            LaneObservation {
                ball_out: false,
                standing_pins: 10,
            },
        );
        let (mut app, ball) = make_test_app(
            lane,
            InputState {
                throw: true,
                ..default()
            },
        );

        app.update();

        assert!(matches!(
            app.world().resource::<LaneState>().phase(),
            Phase::Rolling { .. }
        ));
        let impulse = app.world().get::<ExternalImpulse>(ball).unwrap().impulse;
        // base impulse -80 minus 30 units of power
        assert!(impulse.x.abs() < 1e-6);
        assert!(impulse.y.abs() < 1e-6);
        assert!((impulse.z + 110.0).abs() < 1e-3);
    }
}
