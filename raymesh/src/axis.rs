//! World axis convention shared by the sphere generator and the camera

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Which world axis points "up".
///
/// The sphere generator places its poles on this axis and the orbit camera
/// measures pitch against it, so a viewer must use one value for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UpAxis {
    /// +Y is up, yaw rotates around Y (ray-tracing viewer default)
    #[default]
    Y,
    /// +Z is up, yaw rotates around Z
    Z,
}

impl UpAxis {
    /// Unit vector along the up axis
    pub fn up(self) -> Vec3 {
        match self {
            UpAxis::Y => Vec3::Y,
            UpAxis::Z => Vec3::Z,
        }
    }

    /// Build a world-space vector from `(horizontal_a, vertical, horizontal_b)`.
    ///
    /// For Y-up this is `(a, v, b)`; for Z-up the vertical component moves to
    /// Z and `b` moves to Y.
    pub fn compose(self, horizontal_a: f32, vertical: f32, horizontal_b: f32) -> Vec3 {
        match self {
            UpAxis::Y => Vec3::new(horizontal_a, vertical, horizontal_b),
            UpAxis::Z => Vec3::new(horizontal_a, horizontal_b, vertical),
        }
    }

    /// Whether [`UpAxis::compose`] is a reflection of the Y-up layout.
    ///
    /// Swapping two components flips handedness, so triangle winding derived
    /// in the Y-up frame must be reversed.
    pub fn flips_winding(self) -> bool {
        matches!(self, UpAxis::Z)
    }
}
