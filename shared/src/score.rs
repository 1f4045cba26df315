//! Ten-frame scorecard.
//!
//! Strikes score the rack plus the next two rolls, spares the rack plus the
//! next roll. The last frame gets a bonus roll after a strike or spare and
//! a fresh rack after every strike or spare inside it.

pub const FRAMES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("the game is already complete")]
    GameComplete,
    #[error("{knocked} pins knocked down but only {standing} were standing")]
    TooManyPins { knocked: u32, standing: u32 },
}

#[derive(Debug, Clone)]
pub struct Scorecard {
    rack: u32,
    frames: Vec<Vec<u32>>,
}

impl Scorecard {
    pub fn new(rack: u32) -> Self {
        Self {
            rack,
            frames: Vec::with_capacity(FRAMES),
        }
    }

    pub fn rack(&self) -> u32 {
        self.rack
    }

    fn is_last(index: usize) -> bool {
        index == FRAMES - 1
    }

    fn frame_complete(&self, index: usize) -> bool {
        let Some(rolls) = self.frames.get(index) else {
            return false;
        };
        if Self::is_last(index) {
            match rolls.len() {
                3 => true,
                2 => rolls[0] + rolls[1] < self.rack,
                _ => false,
            }
        } else {
            rolls.first() == Some(&self.rack) || rolls.len() == 2
        }
    }

    pub fn is_complete(&self) -> bool {
        self.frames.len() == FRAMES && self.frame_complete(FRAMES - 1)
    }

    /// Index of the frame the next roll belongs to.
    fn open_frame(&self) -> usize {
        match self.frames.len() {
            0 => 0,
            n if self.frame_complete(n - 1) => n.min(FRAMES - 1),
            n => n - 1,
        }
    }

    /// 1-based frame number the next roll goes into.
    pub fn current_frame(&self) -> usize {
        self.open_frame() + 1
    }

    /// Rolls already made in the frame that is in progress.
    pub fn roll_in_frame(&self) -> usize {
        if self.is_complete() {
            return 0;
        }
        let index = self.open_frame();
        self.frames.get(index).map_or(0, |r| r.len())
    }

    /// Pins standing in front of the next roll.
    pub fn standing(&self) -> u32 {
        if self.is_complete() {
            return 0;
        }
        let index = self.open_frame();
        let Some(rolls) = self.frames.get(index) else {
            return self.rack;
        };
        if !Self::is_last(index) {
            return self.rack - rolls.iter().sum::<u32>();
        }
        match rolls.as_slice() {
            [] => self.rack,
            [first] if *first == self.rack => self.rack,
            [first] => self.rack - first,
            [first, second] if *first == self.rack => {
                if *second == self.rack {
                    self.rack
                } else {
                    self.rack - second
                }
            }
            // a spare in the last frame earns a fresh rack
            [_, _] => self.rack,
            _ => 0,
        }
    }

    /// Whether the pins must be reset before the next roll.
    pub fn needs_rerack(&self) -> bool {
        !self.frames.is_empty() && (self.is_complete() || self.standing() == self.rack)
    }

    pub fn record(&mut self, knocked: u32) -> Result<(), ScoreError> {
        if self.is_complete() {
            return Err(ScoreError::GameComplete);
        }
        let standing = self.standing();
        if knocked > standing {
            return Err(ScoreError::TooManyPins { knocked, standing });
        }
        let index = self.open_frame();
        if index == self.frames.len() {
            self.frames.push(Vec::with_capacity(3));
        }
        self.frames[index].push(knocked);
        Ok(())
    }

    pub fn frame_rolls(&self, index: usize) -> &[u32] {
        self.frames.get(index).map_or(&[], |r| r.as_slice())
    }

    /// Cumulative score per frame; `None` while a frame still waits on bonus rolls.
    pub fn frame_scores(&self) -> Vec<Option<u32>> {
        let rolls: Vec<u32> = self.frames.iter().flatten().copied().collect();
        let mut scores = Vec::with_capacity(FRAMES);
        let mut running = 0u32;
        let mut start = 0usize;
        let mut pending = false;

        for index in 0..FRAMES {
            let frame = self.frame_rolls(index);
            let value = if pending || !self.frame_complete(index) {
                None
            } else if Self::is_last(index) {
                Some(frame.iter().sum::<u32>())
            } else if frame[0] == self.rack {
                match (rolls.get(start + 1), rolls.get(start + 2)) {
                    (Some(a), Some(b)) => Some(self.rack + a + b),
                    _ => None,
                }
            } else if frame[0] + frame[1] == self.rack {
                rolls.get(start + 2).map(|a| self.rack + a)
            } else {
                Some(frame[0] + frame[1])
            };

            match value {
                Some(points) => {
                    running += points;
                    scores.push(Some(running));
                }
                None => {
                    pending = true;
                    scores.push(None);
                }
            }
            start += frame.len();
        }
        scores
    }

    /// Highest cumulative score that is already settled.
    pub fn total(&self) -> u32 {
        self.frame_scores().into_iter().flatten().last().unwrap_or(0)
    }

    /// Scoreboard marks for one frame, e.g. `"X"`, `"7/"`, `"9-"`.
    pub fn marks(&self, index: usize) -> String {
        let rolls = self.frame_rolls(index);
        let mut out = String::new();
        let mut standing = self.rack;
        let mut previous: Option<u32> = None;

        for &roll in rolls {
            let fresh = standing == self.rack;
            let mark = if fresh && roll == self.rack {
                "X".to_string()
            } else if !fresh && roll == standing {
                "/".to_string()
            } else if roll == 0 {
                "-".to_string()
            } else {
                roll.to_string()
            };
            out.push_str(&mark);

            standing -= roll;
            if standing == 0 {
                standing = self.rack;
            }
            if !Self::is_last(index) && previous.is_some() {
                break;
            }
            previous = Some(roll);
        }
        out
    }
}
