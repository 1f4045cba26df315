use crate::config::ThrowConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AimInput {
    Left,
    Right,
    SpinUp,
    SpinDown,
}

/// Where the ball starts its roll and how much sideways hook it gets.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AimState {
    /// Lateral offset of the ball from the lane centre.
    pub offset_x: f32,
    /// Sideways impulse applied with the throw.
    pub spin: f32,
}

impl AimState {
    /// Apply one aiming step, clamped to the configured limits.
    pub fn nudge(&mut self, input: AimInput, config: &ThrowConfig) {
        let lateral = config.lateral_limit;
        let spin = config.spin_limit;
        match input {
            AimInput::Left => {
                self.offset_x = (self.offset_x - config.lateral_step).max(-lateral);
            }
            AimInput::Right => {
                self.offset_x = (self.offset_x + config.lateral_step).min(lateral);
            }
            AimInput::SpinUp => {
                self.spin = (self.spin + config.spin_step).min(spin);
            }
            AimInput::SpinDown => {
                self.spin = (self.spin - config.spin_step).max(-spin);
            }
        }
    }

    /// Impulse for a throw released at `power` on the meter.
    pub fn impulse(&self, power: f32, config: &ThrowConfig) -> [f32; 3] {
        [self.spin, 0.0, config.base_impulse - power]
    }

    /// Yaw of the aim helper bar.
    pub fn helper_yaw(&self, config: &ThrowConfig) -> f32 {
        self.spin * config.helper_yaw_per_spin
    }

    /// Visual yaw of the ball while aiming.
    pub fn ball_yaw(&self) -> f32 {
        self.spin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moves_in_lateral_steps() {
        let config = ThrowConfig::default();
        let mut aim = AimState::default();
        aim.nudge(AimInput::Right, &config);
        aim.nudge(AimInput::Right, &config);
        assert!((aim.offset_x - 0.16).abs() < 1e-6);
        aim.nudge(AimInput::Left, &config);
        assert!((aim.offset_x - 0.08).abs() < 1e-6);
    }

    #[test]
    fn lateral_offset_is_clamped() {
        let config = ThrowConfig::default();
        let mut aim = AimState::default();
        for _ in 0..20 {
            aim.nudge(AimInput::Left, &config);
        }
        assert_eq!(aim.offset_x, -config.lateral_limit);
        for _ in 0..40 {
            aim.nudge(AimInput::Right, &config);
        }
        assert_eq!(aim.offset_x, config.lateral_limit);
    }

    #[test]
    fn spin_caps_at_limit() {
        let config = ThrowConfig::default();
        let mut aim = AimState::default();
        for _ in 0..20 {
            aim.nudge(AimInput::SpinUp, &config);
        }
        assert_eq!(aim.spin, 6.0);
        for _ in 0..40 {
            aim.nudge(AimInput::SpinDown, &config);
        }
        assert_eq!(aim.spin, -6.0);
    }

    #[test]
    fn impulse_adds_power_down_the_lane() {
        let config = ThrowConfig::default();
        let aim = AimState {
            offset_x: 0.0,
            spin: 1.5,
        };
        assert_eq!(aim.impulse(0.0, &config), [1.5, 0.0, -80.0]);
        assert_eq!(aim.impulse(100.0, &config), [1.5, 0.0, -180.0]);
    }

    #[test]
    fn helper_turns_against_spin() {
        let config = ThrowConfig::default();
        let mut aim = AimState::default();
        aim.nudge(AimInput::SpinUp, &config);
        assert!((aim.helper_yaw(&config) - (-0.0075)).abs() < 1e-6);
    }
}
