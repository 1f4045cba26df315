mod spawn;
mod systems;
mod types;

use bevy::prelude::*;

use super::UpdateSet;

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn::spawn_hud).add_systems(
            Update,
            (
                systems::update_power_bar,
                systems::update_scoreboard,
                systems::update_game_over_banner,
            )
                .chain()
                .in_set(UpdateSet::Visuals),
        );
    }
}
