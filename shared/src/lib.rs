//! Engine-independent bowling rules.
//!
//! Everything in here is plain data and pure state transitions so it can be
//! driven by the Bevy client and exercised directly from tests.

pub mod aim;
pub mod config;
pub mod lane;
pub mod power;
pub mod rack;
pub mod score;
