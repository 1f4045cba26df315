//! Whole-game tests for the lane state machine.
//!
//! A tiny stand-in for the physics world keeps a count of standing pins and
//! carries out the commands the lane hands back, the same way the client
//! does after every physics step.

use bowling_shared::config::GameConfig;
use bowling_shared::lane::{Lane, LaneCommand, LaneObservation, Phase};
use bowling_shared::rack::rack_size;

const DT: f32 = 1.0 / 60.0;

struct FakeWorld {
    standing: u32,
    rack: u32,
    ball_out: bool,
    reracks: u32,
    ball_resets: u32,
    scored: Vec<(usize, u32)>,
    final_total: Option<u32>,
}

impl FakeWorld {
    fn new(config: &GameConfig) -> Self {
        let rack = rack_size(config.pins.rows);
        Self {
            standing: rack,
            rack,
            ball_out: false,
            reracks: 0,
            ball_resets: 0,
            scored: Vec::new(),
            final_total: None,
        }
    }

    fn step(&mut self, lane: &mut Lane) {
        let commands = lane.tick(
            DT,
            LaneObservation {
                ball_out: self.ball_out,
                standing_pins: self.standing,
            },
        );
        for command in commands {
            match command {
                LaneCommand::ResetBall => {
                    self.ball_out = false;
                    self.ball_resets += 1;
                }
                LaneCommand::ThrowScored { frame, knocked, .. } => {
                    self.scored.push((frame, knocked));
                }
                LaneCommand::Rerack => {
                    self.standing = self.rack;
                    self.reracks += 1;
                }
                LaneCommand::GameOver { total } => self.final_total = Some(total),
            }
        }
    }

    /// Charge, release, knock `pins` over and wait until the lane accepts input again.
    fn bowl(&mut self, lane: &mut Lane, pins: u32) {
        assert_eq!(lane.phase(), Phase::Aiming, "lane not ready for a throw");
        assert!(lane.press_throw().is_none());
        for _ in 0..20 {
            self.step(lane);
        }
        assert!(lane.press_throw().is_some());

        for _ in 0..90 {
            self.step(lane);
        }
        self.standing -= pins;
        self.ball_out = true;

        for _ in 0..600 {
            self.step(lane);
            if matches!(lane.phase(), Phase::Aiming | Phase::GameOver) {
                return;
            }
        }
        panic!("lane never settled: {:?}", lane.phase());
    }
}

fn play(rolls: &[u32]) -> (Lane, FakeWorld) {
    let config = GameConfig::default();
    let mut lane = Lane::new(&config);
    let mut world = FakeWorld::new(&config);
    for &pins in rolls {
        world.bowl(&mut lane, pins);
    }
    (lane, world)
}

#[test]
fn perfect_game() {
    let (lane, world) = play(&[10; 12]);
    assert_eq!(lane.phase(), Phase::GameOver);
    assert_eq!(world.final_total, Some(300));
    // every strike but the last one reracks
    assert_eq!(world.reracks, 11);
    assert_eq!(world.ball_resets, 12);
}

#[test]
fn open_frames_rerack_after_second_throw() {
    let mut rolls = Vec::new();
    for _ in 0..10 {
        rolls.extend([3, 4]);
    }
    let (lane, world) = play(&rolls);
    assert_eq!(world.final_total, Some(70));
    assert_eq!(world.reracks, 9);
    assert!(lane.scorecard().is_complete());
    assert_eq!(world.scored[0], (1, 3));
    assert_eq!(world.scored[1], (1, 4));
    assert_eq!(world.scored[2], (2, 3));
}

#[test]
fn spares_in_every_frame() {
    let (_, world) = play(&[5; 21]);
    assert_eq!(world.final_total, Some(150));
}

#[test]
fn unattended_ball_times_out_and_frame_continues() {
    let config = GameConfig::default();
    let mut lane = Lane::new(&config);
    let mut world = FakeWorld::new(&config);

    lane.press_throw();
    lane.press_throw();
    // the ball stops on the lane and never drops off the end
    world.standing = 8;
    let steps = ((config.throw.roll_timeout + config.throw.settle_delay) / DT).ceil() as usize + 10;
    for _ in 0..steps {
        world.step(&mut lane);
    }
    assert_eq!(world.ball_resets, 1);
    assert_eq!(world.scored, vec![(1, 2)]);
    assert_eq!(lane.phase(), Phase::Aiming);
    assert_eq!(lane.scorecard().roll_in_frame(), 1);
}

#[test]
fn restart_mid_game() {
    let (mut lane, _) = play(&[10, 7, 2, 4]);
    assert_eq!(lane.scorecard().current_frame(), 3);
    lane.restart();
    assert_eq!(lane.scorecard().current_frame(), 1);
    assert_eq!(lane.scorecard().frame_rolls(0), &[] as &[u32]);
}
