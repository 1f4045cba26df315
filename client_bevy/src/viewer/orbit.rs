//! Orbit camera math for the model viewer.
//!
//! The camera sits on a sphere around `target`, described by a yaw around
//! +Y, a pitch above the horizon and a radius. Drag input is not applied
//! directly: it is queued as angular and pan velocity, and each frame moves
//! the camera by `damping` of what is queued and keeps the rest, so the view
//! eases out after the mouse is released.

use std::f32::consts::{FRAC_PI_2, TAU};

use bevy::math::{Vec2, Vec3};

/// Wheel zoom factor per scroll line.
const ZOOM_STEP: f32 = 0.95;
/// Keeps the camera from flipping over the poles.
const PITCH_MARGIN: f32 = 0.01;
/// Below this the queued motion is dropped.
const REST_EPSILON: f32 = 1e-5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitSettings {
    /// Fraction of the queued motion applied per frame.
    pub damping: f32,
    pub rotate_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitSettings {
    fn default() -> Self {
        Self {
            damping: 0.05,
            rotate_speed: 1.0,
            pan_speed: 1.0,
            zoom_speed: 1.0,
            min_radius: 0.5,
            max_radius: 50.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbitState {
    pub target: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub radius: f32,
    pub settings: OrbitSettings,
    yaw_delta: f32,
    pitch_delta: f32,
    pan_delta: Vec3,
}

impl OrbitState {
    pub fn from_position(eye: Vec3, target: Vec3, settings: OrbitSettings) -> Self {
        let offset = eye - target;
        let radius = offset
            .length()
            .clamp(settings.min_radius, settings.max_radius);
        let dir = offset.normalize_or(Vec3::Z);
        Self {
            target,
            yaw: dir.x.atan2(dir.z),
            pitch: dir.y.clamp(-1.0, 1.0).asin(),
            radius,
            settings,
            yaw_delta: 0.0,
            pitch_delta: 0.0,
            pan_delta: Vec3::ZERO,
        }
    }

    /// Unit vector from the target towards the camera.
    fn back(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    fn right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    fn up(&self) -> Vec3 {
        self.back().cross(self.right())
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.back() * self.radius
    }

    /// Queue a rotation for a drag of `delta` pixels. A drag across the full
    /// viewport height turns the camera once around.
    pub fn rotate(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let scale = TAU / viewport_height * self.settings.rotate_speed;
        self.yaw_delta -= delta.x * scale;
        self.pitch_delta += delta.y * scale;
    }

    /// Queue a pan so the point under the cursor follows a drag of `delta`
    /// pixels at the target's distance.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32, fov: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        let target_distance = self.radius * (fov * 0.5).tan();
        let scale = 2.0 * target_distance / viewport_height * self.settings.pan_speed;
        self.pan_delta += -self.right() * delta.x * scale + self.up() * delta.y * scale;
    }

    /// Positive `lines` (wheel forward) moves the camera in.
    pub fn zoom(&mut self, lines: f32) {
        let factor = ZOOM_STEP.powf(lines * self.settings.zoom_speed);
        self.radius = (self.radius * factor).clamp(self.settings.min_radius, self.settings.max_radius);
    }

    /// Advance one frame of damped motion.
    pub fn update(&mut self) {
        let damping = self.settings.damping.clamp(0.0, 1.0);
        let pitch_limit = FRAC_PI_2 - PITCH_MARGIN;

        self.yaw = (self.yaw + self.yaw_delta * damping) % TAU;
        self.pitch = (self.pitch + self.pitch_delta * damping).clamp(-pitch_limit, pitch_limit);
        self.target += self.pan_delta * damping;

        let keep = 1.0 - damping;
        self.yaw_delta *= keep;
        self.pitch_delta *= keep;
        self.pan_delta *= keep;

        if self.yaw_delta.abs() < REST_EPSILON {
            self.yaw_delta = 0.0;
        }
        if self.pitch_delta.abs() < REST_EPSILON {
            self.pitch_delta = 0.0;
        }
        if self.pan_delta.length_squared() < REST_EPSILON * REST_EPSILON {
            self.pan_delta = Vec3::ZERO;
        }
    }

    pub fn is_moving(&self) -> bool {
        self.yaw_delta != 0.0 || self.pitch_delta != 0.0 || self.pan_delta != Vec3::ZERO
    }
}
