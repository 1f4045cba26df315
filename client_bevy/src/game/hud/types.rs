use bevy::prelude::*;
use bowling_shared::lane::Phase;
use bowling_shared::score::{Scorecard, FRAMES};

use crate::constants::{color_from_hex, Colors};

pub(super) const POWER_BAR_RIGHT: f32 = 24.0;
pub(super) const POWER_BAR_BOTTOM: f32 = 24.0;
pub(super) const POWER_BAR_WIDTH: f32 = 14.0;
pub(super) const POWER_BAR_HEIGHT: f32 = 180.0;

pub(super) const SCORE_LEFT: f32 = 16.0;
pub(super) const SCORE_TOP: f32 = 12.0;

pub(super) const CONTROLS_HINT: &str =
    "Left/Right move   Up/Down spin   Space or click: charge, then throw   R restart";

#[derive(Component)]
pub(super) struct HudPowerFill;

#[derive(Component)]
pub(super) struct HudStatusText;

#[derive(Component)]
pub(super) struct HudMarksText;

#[derive(Component)]
pub(super) struct HudTotalsText;

#[derive(Component)]
pub(super) struct HudGameOverText;

/// Power bar fill colour, green when empty shading to red when full.
pub(super) fn power_color(fraction: f32) -> Color {
    let low = color_from_hex(Colors::POWER_LOW).to_srgba();
    let high = color_from_hex(Colors::POWER_HIGH).to_srgba();
    let t = fraction.clamp(0.0, 1.0);
    Color::srgb(
        low.red + (high.red - low.red) * t,
        low.green + (high.green - low.green) * t,
        low.blue + (high.blue - low.blue) * t,
    )
}

/// Frame marks and running totals, one column per frame.
pub(super) fn scoreboard_lines(card: &Scorecard) -> (String, String) {
    let scores = card.frame_scores();
    let mut marks = Vec::with_capacity(FRAMES);
    let mut totals = Vec::with_capacity(FRAMES);
    for (index, score) in scores.iter().enumerate() {
        let m = card.marks(index);
        marks.push(format!("{:>3}", if m.is_empty() { "." } else { m.as_str() }));
        totals.push(match score {
            Some(total) => format!("{total:>3}"),
            None => "  .".to_string(),
        });
    }
    (marks.join(" |"), totals.join(" |"))
}

pub(super) fn status_line(phase: Phase, card: &Scorecard) -> String {
    let frame = card.current_frame();
    let roll = card.roll_in_frame() + 1;
    match phase {
        Phase::Aiming => format!("Frame {frame}  Ball {roll}  - aim"),
        Phase::Charging(_) => format!("Frame {frame}  Ball {roll}  - set power"),
        Phase::Rolling { .. } => format!("Frame {frame}  Ball {roll}  - rolling"),
        Phase::Settling { .. } | Phase::Reracking { .. } => format!("Frame {frame}"),
        Phase::GameOver => "Game over".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_card_shows_placeholders() {
        let card = Scorecard::new(10);
        let (marks, totals) = scoreboard_lines(&card);
        assert_eq!(marks.matches('.').count(), FRAMES);
        assert_eq!(totals.matches('.').count(), FRAMES);
    }

    #[test]
    fn settled_frames_show_totals() {
        let mut card = Scorecard::new(10);
        for pins in [7, 3, 4, 2] {
            card.record(pins).unwrap();
        }
        let (marks, totals) = scoreboard_lines(&card);
        assert!(marks.starts_with(" 7/ | 42"));
        assert!(totals.starts_with(" 14 | 20"));
    }

    #[test]
    fn status_reflects_phase() {
        let card = Scorecard::new(10);
        assert_eq!(status_line(Phase::Aiming, &card), "Frame 1  Ball 1  - aim");
        assert_eq!(status_line(Phase::GameOver, &card), "Game over");
    }

    #[test]
    fn power_color_runs_green_to_red() {
        let empty = power_color(0.0).to_srgba();
        let full = power_color(1.0).to_srgba();
        assert!(empty.green > empty.red);
        assert!(full.red > full.green);
    }
}
