mod ball;
mod core;
mod deck;
mod hud;
mod input;
mod physics;
mod pins;
mod throw;

pub use ball::BallPlugin;
pub use core::{CorePlugin, LaneEventMessage};
pub(crate) use core::{FixedSet, LaneState, UpdateSet};
pub use deck::DeckPlugin;
pub use hud::HudPlugin;
pub use input::InputPlugin;
pub use physics::PhysicsSyncPlugin;
pub use pins::PinsPlugin;
pub use throw::ThrowPlugin;

use bevy::prelude::Vec3;

pub(crate) fn vec3(v: [f32; 3]) -> Vec3 {
    Vec3::from_array(v)
}
