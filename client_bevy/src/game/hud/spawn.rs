use bevy::prelude::*;

use crate::constants::{color_from_hex, Colors};

use super::types::{
    power_color, HudGameOverText, HudMarksText, HudPowerFill, HudStatusText, HudTotalsText,
    CONTROLS_HINT, POWER_BAR_BOTTOM, POWER_BAR_HEIGHT, POWER_BAR_RIGHT, POWER_BAR_WIDTH,
    SCORE_LEFT, SCORE_TOP,
};

pub(super) fn spawn_hud(mut commands: Commands) {
    let small = TextFont::from_font_size(12.0);
    let medium = TextFont::from_font_size(16.0);

    // Strength bar: a frame that fills from the bottom while charging.
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(POWER_BAR_RIGHT),
                bottom: Val::Px(POWER_BAR_BOTTOM),
                width: Val::Px(POWER_BAR_WIDTH),
                height: Val::Px(POWER_BAR_HEIGHT),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::FlexEnd,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.08)),
            BorderColor::all(color_from_hex(Colors::HUD_DIM)),
            BorderRadius::all(Val::Px(3.0)),
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    width: Val::Percent(100.0),
                    height: Val::Percent(0.0),
                    ..default()
                },
                BackgroundColor(power_color(0.0)),
                HudPowerFill,
            ));
        });

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(SCORE_LEFT),
            top: Val::Px(SCORE_TOP),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(4.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                medium.clone(),
                TextColor(color_from_hex(Colors::HUD_TEXT)),
                HudStatusText,
            ));
            parent.spawn((
                Text::new(""),
                small.clone(),
                TextColor(color_from_hex(Colors::HUD_TEXT)),
                HudMarksText,
            ));
            parent.spawn((
                Text::new(""),
                small.clone(),
                TextColor(color_from_hex(Colors::HUD_DIM)),
                HudTotalsText,
            ));
        });

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(SCORE_LEFT),
            bottom: Val::Px(12.0),
            ..default()
        },
        Text::new(CONTROLS_HINT),
        small,
        TextColor(color_from_hex(Colors::HUD_DIM)),
    ));

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            top: Val::Percent(40.0),
            justify_content: JustifyContent::Center,
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new(""),
                TextFont::from_font_size(28.0),
                TextColor(color_from_hex(Colors::HUD_TEXT)),
                Visibility::Hidden,
                HudGameOverText,
            ));
        });
}
