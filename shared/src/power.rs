/// Oscillating strength meter shown while a throw is being charged.
///
/// The level sweeps from 0 to `max` and back at `rate` units per second,
/// reflecting off both ends.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PowerMeter {
    pub level: f32,
    pub rising: bool,
    pub max: f32,
    pub rate: f32,
}

impl PowerMeter {
    pub fn new(max: f32, rate: f32) -> Self {
        Self {
            level: 0.0,
            rising: true,
            max,
            rate,
        }
    }

    pub fn step(&mut self, dt: f32) {
        if self.max <= 0.0 {
            return;
        }
        let mut remaining = (self.rate * dt).max(0.0) % (2.0 * self.max);
        while remaining > 0.0 {
            let room = if self.rising {
                self.max - self.level
            } else {
                self.level
            };
            if remaining < room {
                self.level += if self.rising { remaining } else { -remaining };
                break;
            }
            self.level = if self.rising { self.max } else { 0.0 };
            self.rising = !self.rising;
            remaining -= room;
        }
    }

    /// Level as a fraction of the full scale.
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            0.0
        } else {
            (self.level / self.max).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn starts_empty_and_rising() {
        let meter = PowerMeter::new(100.0, 100.0);
        assert_eq!(meter.level, 0.0);
        assert!(meter.rising);
        assert_eq!(meter.fraction(), 0.0);
    }

    #[test]
    fn rises_at_rate() {
        let mut meter = PowerMeter::new(100.0, 100.0);
        for _ in 0..30 {
            meter.step(DT);
        }
        assert!((meter.level - 50.0).abs() < 1e-2);
        assert!(meter.rising);
    }

    #[test]
    fn reflects_off_the_top() {
        let mut meter = PowerMeter::new(100.0, 100.0);
        meter.step(1.25);
        assert!((meter.level - 75.0).abs() < 1e-3);
        assert!(!meter.rising);
    }

    #[test]
    fn reflects_off_the_bottom() {
        let mut meter = PowerMeter::new(100.0, 100.0);
        meter.step(2.1);
        assert!((meter.level - 10.0).abs() < 1e-3);
        assert!(meter.rising);
    }

    #[test]
    fn never_leaves_range() {
        let mut meter = PowerMeter::new(100.0, 100.0);
        for _ in 0..10_000 {
            meter.step(DT);
            assert!((0.0..=100.0).contains(&meter.level));
        }
    }

    #[test]
    fn zero_dt_is_a_no_op() {
        let mut meter = PowerMeter::new(100.0, 100.0);
        meter.step(0.3);
        let before = meter;
        meter.step(0.0);
        assert_eq!(meter, before);
    }
}
