//! Bevy front end for the bowling lane and the standalone model viewer.

pub mod constants;
pub mod game;
pub mod settings;
pub mod viewer;
