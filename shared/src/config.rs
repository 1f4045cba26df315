use std::path::Path;

/// Lane (the static deck the ball rolls on).
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LaneConfig {
    pub center: [f32; 3],
    /// Full extents (width, height, length).
    pub size: [f32; 3],
    pub texture: Option<String>,
    pub texture_repeat: [f32; 2],
}

impl Default for LaneConfig {
    fn default() -> Self {
        Self {
            center: [0.0, -0.4, -10.0],
            size: [1.28, 0.2, 22.0], // 1.28 m is the official lane width
            texture: None,
            texture_repeat: [3.0, 0.5],
        }
    }
}

impl LaneConfig {
    /// Height of the deck surface.
    pub fn top(&self) -> f32 {
        self.center[1] + self.size[1] * 0.5
    }
}

/// Bowling ball.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BallConfig {
    pub radius: f32,
    pub mass: f32,
    pub spawn: [f32; 3],
    /// Below this height the ball has left the lane.
    pub out_of_play_y: f32,
    pub texture: Option<String>,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            radius: 0.11,
            mass: 12.0,
            spawn: [0.0, 0.0, 0.0],
            out_of_play_y: -2.0,
            texture: None,
        }
    }
}

/// Pins and the rack they stand in.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PinConfig {
    pub top_radius: f32,
    pub bottom_radius: f32,
    pub height: f32,
    pub mass: f32,
    pub rows: u32,
    pub row_gap: f32,
    pub col_gap: f32,
    /// Centre height of an upright pin.
    pub y: f32,
    /// Distance from the foul line (z = 0) to the head pin.
    pub offset: f32,
    pub sleep_linear_threshold: f32,
    pub sleep_angular_threshold: f32,
    /// A pin whose centre drops below this height counts as knocked down.
    pub fallen_y: f32,
    /// Seconds a downed pin stays in the world before it is removed.
    pub removal_delay: f32,
    /// Optional glTF scene used instead of the generated pin mesh.
    pub model: Option<String>,
    pub model_scale: f32,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            top_radius: 0.020,
            bottom_radius: 0.055,
            height: 0.38,
            mass: 1.5,
            rows: 4,
            row_gap: 0.24,
            col_gap: 0.16,
            y: -0.1,
            offset: 20.0,
            sleep_linear_threshold: 0.2,
            sleep_angular_threshold: 0.2,
            fallen_y: -0.15,
            removal_delay: 1.0,
            model: None,
            model_scale: 0.2,
        }
    }
}

/// Aiming, charging and the timers between throws.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ThrowConfig {
    /// Impulse along z applied with an empty power meter (negative = down the lane).
    pub base_impulse: f32,
    pub power_max: f32,
    /// Power meter units per second.
    pub power_rate: f32,
    pub lateral_step: f32,
    pub lateral_limit: f32,
    pub spin_step: f32,
    pub spin_limit: f32,
    /// Aim helper yaw (radians) per unit of spin.
    pub helper_yaw_per_spin: f32,
    /// Seconds a throw may roll before it is ended regardless.
    pub roll_timeout: f32,
    pub settle_delay: f32,
    pub rerack_delay: f32,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            base_impulse: -80.0,
            power_max: 100.0,
            power_rate: 100.0, // one unit every 10 ms
            lateral_step: 0.08,
            lateral_limit: 0.5,
            spin_step: 0.75,
            spin_limit: 6.0,
            helper_yaw_per_spin: -0.01,
            roll_timeout: 8.0,
            settle_delay: 0.5,
            rerack_delay: 0.5,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PhysicsConfig {
    pub gravity: [f32; 3],
    pub dt: f32,
    pub substeps: usize,
    pub solver_iterations: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: [0.0, -9.0, 0.0],
            dt: 1.0 / 60.0,
            substeps: 1,
            solver_iterations: 10,
        }
    }
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CameraConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
    pub follow_offset: f32,
    pub follow_factor: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: 30.0,
            near: 1.0,
            far: 100.0,
            position: [0.2, 0.5, 6.0],
            follow_offset: 4.0,
            follow_factor: 0.7,
        }
    }
}

impl CameraConfig {
    /// Camera z that trails the ball down the lane.
    pub fn follow_z(&self, ball_z: f32) -> f32 {
        (ball_z + self.follow_offset) * self.follow_factor
    }
}

/// Whole-game configuration.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    pub lane: LaneConfig,
    pub ball: BallConfig,
    pub pins: PinConfig,
    pub throw: ThrowConfig,
    pub physics: PhysicsConfig,
    pub camera: CameraConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

fn positive(name: &str, value: f32) -> Result<(), String> {
    if !value.is_finite() || value <= 0.0 {
        return Err(format!("{name} must be finite and > 0"));
    }
    Ok(())
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        tracing::info!("loaded game config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (i, extent) in self.lane.size.iter().enumerate() {
            positive(&format!("lane.size[{i}]"), *extent)?;
        }
        positive("ball.radius", self.ball.radius)?;
        positive("ball.mass", self.ball.mass)?;
        if self.ball.out_of_play_y >= self.lane.top() {
            return Err("ball.out_of_play_y must be below the lane surface".to_string());
        }

        let pins = &self.pins;
        positive("pins.top_radius", pins.top_radius)?;
        positive("pins.bottom_radius", pins.bottom_radius)?;
        positive("pins.height", pins.height)?;
        positive("pins.mass", pins.mass)?;
        positive("pins.model_scale", pins.model_scale)?;
        if pins.rows == 0 || pins.rows > 8 {
            return Err("pins.rows must be in 1..=8".to_string());
        }
        let back_row = (pins.rows - 1) as f32;
        if pins.col_gap * back_row + pins.bottom_radius > self.lane.size[0] * 0.5 {
            return Err("pins.rows and pins.col_gap put outer pins off the lane".to_string());
        }
        let lane_end = self.lane.center[2] - self.lane.size[2] * 0.5;
        if -pins.offset - pins.row_gap * back_row - pins.bottom_radius < lane_end {
            return Err("pins.rows and pins.row_gap put the back row past the lane end".to_string());
        }
        if pins.fallen_y >= pins.y {
            return Err("pins.fallen_y must be below the upright pin height".to_string());
        }
        if !pins.removal_delay.is_finite() || pins.removal_delay < 0.0 {
            return Err("pins.removal_delay must be finite and >= 0".to_string());
        }

        let throw = &self.throw;
        positive("throw.power_max", throw.power_max)?;
        positive("throw.power_rate", throw.power_rate)?;
        positive("throw.lateral_step", throw.lateral_step)?;
        positive("throw.spin_step", throw.spin_step)?;
        positive("throw.roll_timeout", throw.roll_timeout)?;
        if !throw.lateral_limit.is_finite() || throw.lateral_limit < 0.0 {
            return Err("throw.lateral_limit must be finite and >= 0".to_string());
        }
        if throw.lateral_limit > self.lane.size[0] * 0.5 {
            return Err("throw.lateral_limit must keep the ball on the lane".to_string());
        }
        if !throw.spin_limit.is_finite() || throw.spin_limit < 0.0 {
            return Err("throw.spin_limit must be finite and >= 0".to_string());
        }
        if throw.settle_delay < 0.0 || throw.rerack_delay < 0.0 {
            return Err("throw delays must be >= 0".to_string());
        }

        positive("physics.dt", self.physics.dt)?;
        if self.physics.substeps == 0 {
            return Err("physics.substeps must be >= 1".to_string());
        }
        if self.physics.solver_iterations == 0 {
            return Err("physics.solver_iterations must be >= 1".to_string());
        }

        let camera = &self.camera;
        if !(1.0..179.0).contains(&camera.fov_degrees) {
            return Err("camera.fov_degrees must be in [1, 179)".to_string());
        }
        positive("camera.near", camera.near)?;
        if camera.far <= camera.near {
            return Err("camera.far must be greater than camera.near".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_game_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn lane_top_sits_under_the_pins() {
        let config = GameConfig::default();
        let pin_base = config.pins.y - config.pins.height * 0.5;
        assert!((config.lane.top() - (-0.3)).abs() < 1e-6);
        assert!(pin_base >= config.lane.top() - 1e-3);
    }

    #[test]
    fn camera_follows_ball_down_the_lane() {
        let camera = CameraConfig::default();
        assert!((camera.follow_z(0.0) - 2.8).abs() < 1e-5);
        assert!((camera.follow_z(-20.0) - (-11.2)).abs() < 1e-4);
    }

    #[test]
    fn zero_rows_invalid() {
        let mut config = GameConfig::default();
        config.pins.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rows_off_the_deck_invalid() {
        for rows in 1..=4 {
            let mut config = GameConfig::default();
            config.pins.rows = rows;
            assert!(config.validate().is_ok(), "{rows} rows should fit");
        }
        for rows in 5..=8 {
            let mut config = GameConfig::default();
            config.pins.rows = rows;
            assert!(config.validate().is_err(), "{rows} rows should not fit");
        }
    }

    #[test]
    fn back_row_past_the_lane_end_invalid() {
        let mut config = GameConfig::default();
        config.pins.row_gap = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn far_plane_before_near_invalid() {
        let mut config = GameConfig::default();
        config.camera.far = 0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn lateral_limit_off_the_lane_invalid() {
        let mut config = GameConfig::default();
        config.throw.lateral_limit = 2.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = GameConfig::from_json_str(r#"{ "pins": { "rows": 3 }, "ball": { "mass": 7.0 } }"#)
            .unwrap();
        assert_eq!(config.pins.rows, 3);
        assert_eq!(config.ball.mass, 7.0);
        assert_eq!(config.pins.row_gap, 0.24);
        assert_eq!(config.throw.base_impulse, -80.0);
    }

    #[test]
    fn invalid_json_values_are_rejected() {
        let err = GameConfig::from_json_str(r#"{ "ball": { "radius": -1.0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = GameConfig::load("/definitely/not/here/bowling.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
