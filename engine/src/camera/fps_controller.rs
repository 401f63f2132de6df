//! First-Person View Module
//!
//! Eye position and look angles of the editing player. Produces the ray the
//! editor casts every tick.
//!
//! - Yaw is unrestricted, 0 looks towards -Z
//! - Pitch clamped to ±89 degrees to prevent gimbal lock

use glam::Vec3;

/// Pitch limit constant: -89 degrees in radians
const PITCH_LIMIT_MIN: f32 = -89.0 * std::f32::consts::PI / 180.0;
/// Pitch limit constant: +89 degrees in radians
const PITCH_LIMIT_MAX: f32 = 89.0 * std::f32::consts::PI / 180.0;

/// Height of the eye above the player's position
pub const DEFAULT_EYE_HEIGHT: f32 = 0.8;

#[derive(Clone, Debug)]
pub struct FirstPersonView {
    /// Player position in world space (centre of the player volume)
    pub position: Vec3,
    /// Eye offset above `position`
    pub eye_height: f32,
    /// Horizontal angle (radians)
    pub yaw: f32,
    /// Vertical angle (radians) - clamped
    pitch: f32,
}

impl Default for FirstPersonView {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.0, 0.0),
            eye_height: DEFAULT_EYE_HEIGHT,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl FirstPersonView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set look angles in radians. Pitch is clamped to the limits.
    pub fn look(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(PITCH_LIMIT_MIN, PITCH_LIMIT_MAX);
    }

    /// World-space eye position (ray origin)
    pub fn eye(&self) -> Vec3 {
        self.position + Vec3::Y * self.eye_height
    }

    /// Normalized look direction
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }
}
