use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bowling_shared::lane::Phase;

use crate::game::LaneState;

use super::types::{
    power_color, scoreboard_lines, status_line, HudGameOverText, HudMarksText, HudPowerFill,
    HudStatusText, HudTotalsText,
};

type StatusTextQuery<'w, 's> = Query<'w, 's, &'static mut Text, With<HudStatusText>>;
type MarksTextQuery<'w, 's> = Query<'w, 's, &'static mut Text, With<HudMarksText>>;
type TotalsTextQuery<'w, 's> = Query<'w, 's, &'static mut Text, With<HudTotalsText>>;
type ScoreTextSet<'w, 's> = ParamSet<
    'w,
    's,
    (
        StatusTextQuery<'w, 's>,
        MarksTextQuery<'w, 's>,
        TotalsTextQuery<'w, 's>,
    ),
>;

#[derive(SystemParam)]
pub(super) struct ScoreboardQueries<'w, 's> {
    texts: ScoreTextSet<'w, 's>,
}

fn set_text(text: &mut Text, value: String) {
    if text.0 != value {
        text.0 = value;
    }
}

pub(super) fn update_power_bar(
    lane: Res<LaneState>,
    mut q_fill: Query<(&mut Node, &mut BackgroundColor), With<HudPowerFill>>,
) {
    let fraction = lane.power_fraction();
    for (mut node, mut color) in &mut q_fill {
        node.height = Val::Percent(fraction * 100.0);
        color.0 = power_color(fraction);
    }
}

pub(super) fn update_scoreboard(lane: Res<LaneState>, mut queries: ScoreboardQueries) {
    let card = lane.scorecard();
    let (marks, totals) = scoreboard_lines(card);

    if let Ok(mut text) = queries.texts.p0().single_mut() {
        set_text(&mut text, status_line(lane.phase(), card));
    }
    if let Ok(mut text) = queries.texts.p1().single_mut() {
        set_text(&mut text, marks);
    }
    if let Ok(mut text) = queries.texts.p2().single_mut() {
        set_text(&mut text, totals);
    }
}

pub(super) fn update_game_over_banner(
    lane: Res<LaneState>,
    mut q_banner: Query<(&mut Text, &mut Visibility), With<HudGameOverText>>,
) {
    let Ok((mut text, mut visibility)) = q_banner.single_mut() else {
        return;
    };
    if lane.phase() == Phase::GameOver {
        set_text(
            &mut text,
            format!(
                "Final score {}  -  press R to play again",
                lane.scorecard().total()
            ),
        );
        *visibility = Visibility::Visible;
    } else {
        *visibility = Visibility::Hidden;
    }
}
