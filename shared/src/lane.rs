//! Throw and frame sequencing for a single lane.
//!
//! The client feeds in player input and, once per physics step, what it
//! observed in the world (is the ball still on the lane, how many pins are
//! standing). The lane answers with commands the client must carry out on
//! the world: put the ball back, rebuild the rack.

use crate::aim::{AimInput, AimState};
use crate::config::{GameConfig, ThrowConfig};
use crate::power::PowerMeter;
use crate::rack::rack_size;
use crate::score::Scorecard;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Phase {
    Aiming,
    Charging(PowerMeter),
    Rolling { elapsed: f32 },
    /// Ball is back at the foul line, pins are still settling.
    Settling { remaining: f32 },
    Reracking { remaining: f32 },
    GameOver,
}

/// A released throw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Throw {
    pub impulse: [f32; 3],
    pub power: f32,
}

/// What the world looked like after a physics step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LaneObservation {
    pub ball_out: bool,
    pub standing_pins: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LaneCommand {
    /// Return the ball to the spawn point at rest and clear the aim.
    ResetBall,
    ThrowScored {
        frame: usize,
        knocked: u32,
        total: u32,
    },
    /// Remove every pin and set up a full rack.
    Rerack,
    GameOver {
        total: u32,
    },
}

pub struct Lane {
    config: ThrowConfig,
    phase: Phase,
    aim: AimState,
    card: Scorecard,
}

impl Lane {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            config: config.throw.clone(),
            phase: Phase::Aiming,
            aim: AimState::default(),
            card: Scorecard::new(rack_size(config.pins.rows)),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn aim(&self) -> AimState {
        self.aim
    }

    pub fn scorecard(&self) -> &Scorecard {
        &self.card
    }

    /// Power meter fill in `0..=1`; empty outside of charging.
    pub fn power_fraction(&self) -> f32 {
        match self.phase {
            Phase::Charging(meter) => meter.fraction(),
            _ => 0.0,
        }
    }

    /// Aim adjustments are only accepted before charging starts.
    pub fn nudge(&mut self, input: AimInput) -> bool {
        if self.phase != Phase::Aiming {
            return false;
        }
        self.aim.nudge(input, &self.config);
        true
    }

    /// First press starts the power meter, second press releases the ball.
    pub fn press_throw(&mut self) -> Option<Throw> {
        match self.phase {
            Phase::Aiming => {
                self.phase = Phase::Charging(PowerMeter::new(
                    self.config.power_max,
                    self.config.power_rate,
                ));
                None
            }
            Phase::Charging(meter) => {
                let power = meter.level;
                let impulse = self.aim.impulse(power, &self.config);
                self.phase = Phase::Rolling { elapsed: 0.0 };
                tracing::debug!(power, ?impulse, "ball released");
                Some(Throw { impulse, power })
            }
            _ => None,
        }
    }

    pub fn tick(&mut self, dt: f32, observed: LaneObservation) -> Vec<LaneCommand> {
        let mut commands = Vec::new();
        match self.phase {
            Phase::Aiming | Phase::GameOver => {}
            Phase::Charging(mut meter) => {
                meter.step(dt);
                self.phase = Phase::Charging(meter);
            }
            Phase::Rolling { elapsed } => {
                let elapsed = elapsed + dt;
                if observed.ball_out || elapsed >= self.config.roll_timeout {
                    if !observed.ball_out {
                        tracing::debug!("roll timed out after {elapsed:.1}s");
                    }
                    self.aim = AimState::default();
                    self.phase = Phase::Settling {
                        remaining: self.config.settle_delay,
                    };
                    commands.push(LaneCommand::ResetBall);
                } else {
                    self.phase = Phase::Rolling { elapsed };
                }
            }
            Phase::Settling { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.score_throw(observed.standing_pins, &mut commands);
                } else {
                    self.phase = Phase::Settling { remaining };
                }
            }
            Phase::Reracking { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.phase = Phase::Aiming;
                    commands.push(LaneCommand::Rerack);
                } else {
                    self.phase = Phase::Reracking { remaining };
                }
            }
        }
        commands
    }

    fn score_throw(&mut self, standing_pins: u32, commands: &mut Vec<LaneCommand>) {
        let frame = self.card.current_frame();
        let knocked = self.card.standing().saturating_sub(standing_pins);
        if let Err(err) = self.card.record(knocked) {
            tracing::warn!("throw not scored: {err}");
        }
        let total = self.card.total();
        tracing::info!("frame {frame}: {knocked} pins down, total {total}");
        commands.push(LaneCommand::ThrowScored {
            frame,
            knocked,
            total,
        });

        if self.card.is_complete() {
            tracing::info!("game over, final score {total}");
            self.phase = Phase::GameOver;
            commands.push(LaneCommand::GameOver { total });
        } else if self.card.needs_rerack() {
            self.phase = Phase::Reracking {
                remaining: self.config.rerack_delay,
            };
        } else {
            self.phase = Phase::Aiming;
        }
    }

    /// Start a new game from the first frame.
    pub fn restart(&mut self) {
        self.phase = Phase::Aiming;
        self.aim = AimState::default();
        self.card = Scorecard::new(self.card.rack());
    }
}
