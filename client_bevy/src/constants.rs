pub const GAME_WINDOW_WIDTH: u32 = 1024;
pub const GAME_WINDOW_HEIGHT: u32 = 640;

pub const VIEWER_WINDOW_WIDTH: u32 = 600;
pub const VIEWER_WINDOW_HEIGHT: u32 = 400;

/// Canvas the web build renders into.
pub const GAME_CANVAS: &str = "#bowling";
pub const VIEWER_CANVAS: &str = "#viewer";

pub const LANE_FRICTION: f32 = 0.3;
pub const LANE_RESTITUTION: f32 = 0.3;
pub const BALL_FRICTION: f32 = 0.3;
pub const BALL_RESTITUTION: f32 = 0.3;
pub const PIN_FRICTION: f32 = 0.4;
pub const PIN_RESTITUTION: f32 = 0.5;
pub const PIN_SEGMENTS: u32 = 10;

pub const AIM_HELPER_SIZE: [f32; 3] = [0.04, 0.01, 1.5];
/// The helper bar starts at the ball and points down the lane.
pub const AIM_HELPER_REACH: f32 = 1.0;
pub const AIM_HELPER_Y: f32 = -0.3;

pub const KEY_LIGHT_POSITIONS: [[f32; 3]; 2] = [[20.0, 20.0, -50.0], [-20.0, 20.0, -50.0]];
pub const KEY_LIGHT_ILLUMINANCE: f32 = 6_000.0;
pub const GAME_AMBIENT_BRIGHTNESS: f32 = 250.0;
pub const VIEWER_AMBIENT_BRIGHTNESS: f32 = 900.0;

#[derive(Clone, Copy)]
pub struct Colors;

impl Colors {
    pub const BACKGROUND: u32 = 0x000000;
    pub const LANE: u32 = 0xc89a64;
    pub const BALL: u32 = 0x1d3f8c;
    pub const PIN: u32 = 0xffffff;
    pub const AIM_HELPER: u32 = 0x288bbd;
    pub const AMBIENT: u32 = 0xaeaeae;
    pub const VIEWER_AMBIENT: u32 = 0xececec;
    pub const HUD_TEXT: u32 = 0xf0f0f0;
    pub const HUD_DIM: u32 = 0x888888;
    pub const POWER_LOW: u32 = 0x44ff88;
    pub const POWER_HIGH: u32 = 0xff4444;
}

pub fn color_from_hex(rgb: u32) -> bevy::prelude::Color {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    bevy::prelude::Color::srgb(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_from_hex_parses_correctly() {
        let c = color_from_hex(0x288bbd);
        if let bevy::prelude::Color::Srgba(srgba) = c {
            assert!((srgba.red - 0.157).abs() < 1e-2);
            assert!((srgba.green - 0.545).abs() < 1e-2);
            assert!((srgba.blue - 0.741).abs() < 1e-2);
        } else {
            panic!("Expected Srgba color variant");
        }
    }
}
