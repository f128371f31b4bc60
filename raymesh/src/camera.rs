//! Orbit camera controller
//!
//! Spherical-coordinate camera orbiting the origin. Pointer drags change yaw
//! and pitch, wheel input changes distance, and the Cartesian position is
//! derived from the state on demand.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::axis::UpAxis;

/// Button mask bit for the primary pointer button
pub const PRIMARY_BUTTON: u32 = 1;

/// Vertical field of view used by [`OrbitCamera::projection_matrix`] (45°)
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_4;

/// Near clip plane
pub const Z_NEAR: f32 = 0.1;

/// Far clip plane
pub const Z_FAR: f32 = 100.0;

/// Sign applied to a drag delta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DragDirection {
    /// Angle increases with the delta
    #[default]
    Normal,
    /// Angle decreases with the delta
    Inverted,
}

impl DragDirection {
    fn sign(self) -> f32 {
        match self {
            DragDirection::Normal => 1.0,
            DragDirection::Inverted => -1.0,
        }
    }
}

/// Camera tuning and initial state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    /// Radians per pixel of drag (default: 0.01)
    #[serde(default = "default_drag_sensitivity")]
    pub drag_sensitivity: f32,
    /// Distance units per wheel delta unit (default: 0.01)
    #[serde(default = "default_scroll_sensitivity")]
    pub scroll_sensitivity: f32,
    /// Minimum distance from the origin (default: 1.0)
    #[serde(default = "default_distance_floor")]
    pub distance_floor: f32,
    /// Maximum distance from the origin (default: 100.0)
    #[serde(default = "default_distance_max")]
    pub distance_max: f32,
    /// Initial distance (default: 5.0)
    #[serde(default = "default_initial_distance")]
    pub initial_distance: f32,
    /// Initial pitch in radians (default: 0.0)
    #[serde(default)]
    pub initial_pitch: f32,
    /// Initial yaw in radians (default: 0.0)
    #[serde(default)]
    pub initial_yaw: f32,
    /// Horizontal drag direction (default: normal)
    #[serde(default)]
    pub yaw_direction: DragDirection,
    /// Vertical drag direction (default: normal)
    #[serde(default)]
    pub pitch_direction: DragDirection,
}

fn default_drag_sensitivity() -> f32 {
    0.01
}
fn default_scroll_sensitivity() -> f32 {
    0.01
}
fn default_distance_floor() -> f32 {
    1.0
}
fn default_distance_max() -> f32 {
    100.0
}
fn default_initial_distance() -> f32 {
    5.0
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            drag_sensitivity: default_drag_sensitivity(),
            scroll_sensitivity: default_scroll_sensitivity(),
            distance_floor: default_distance_floor(),
            distance_max: default_distance_max(),
            initial_distance: default_initial_distance(),
            initial_pitch: 0.0,
            initial_yaw: 0.0,
            yaw_direction: DragDirection::default(),
            pitch_direction: DragDirection::default(),
        }
    }
}

impl CameraSettings {
    /// Repair settings that would break the distance invariant
    fn sanitized(mut self) -> Self {
        if !(self.distance_floor.is_finite() && self.distance_floor > 0.0) {
            warn!(
                "CameraSettings: distance_floor must be > 0.0, got {}, using {}",
                self.distance_floor,
                default_distance_floor()
            );
            self.distance_floor = default_distance_floor();
        }
        if !(self.distance_max >= self.distance_floor) {
            warn!(
                "CameraSettings: distance_max {} below distance_floor {}, raising it",
                self.distance_max, self.distance_floor
            );
            self.distance_max = self.distance_floor;
        }
        self
    }
}

/// Input forwarded from the windowing glue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved by `(dx, dy)` pixels with the given button mask
    PointerMove { buttons: u32, dx: f32, dy: f32 },
    /// Wheel scrolled by `dy`
    Wheel { dy: f32 },
}

/// Copy of the camera state handed to a renderer
///
/// A render thread reads snapshots; only the input side mutates the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub position: Vec3,
    pub pitch: f32,
    pub yaw: f32,
    pub distance: f32,
}

/// Orbit camera around the origin
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Elevation in radians, within `[-π/2, π/2]`
    pitch: f32,
    /// Azimuth in radians, unbounded
    yaw: f32,
    /// Distance from the origin, within `[distance_floor, distance_max]`
    distance: f32,
    settings: CameraSettings,
    up: UpAxis,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self::new(CameraSettings::default(), UpAxis::default())
    }
}

impl OrbitCamera {
    /// Create a camera at the configured initial state
    pub fn new(settings: CameraSettings, up: UpAxis) -> Self {
        let settings = settings.sanitized();
        let mut camera = Self {
            pitch: 0.0,
            yaw: 0.0,
            distance: settings.distance_floor,
            settings,
            up,
        };
        camera.reset();
        camera
    }

    /// Restore the initial state
    pub fn reset(&mut self) {
        let finite_or_zero = |v: f32| if v.is_finite() { v } else { 0.0 };
        self.yaw = finite_or_zero(self.settings.initial_yaw);
        self.pitch = finite_or_zero(self.settings.initial_pitch).clamp(-FRAC_PI_2, FRAC_PI_2);
        self.distance = self.clamp_distance(self.settings.initial_distance);
    }

    /// Apply a drag of `(dx, dy)` pixels
    ///
    /// Non-finite deltas are ignored.
    pub fn on_drag(&mut self, dx: f32, dy: f32) {
        if !(dx.is_finite() && dy.is_finite()) {
            return;
        }
        let s = &self.settings;
        self.yaw += s.yaw_direction.sign() * dx * s.drag_sensitivity;
        self.pitch = (self.pitch + s.pitch_direction.sign() * dy * s.drag_sensitivity)
            .clamp(-FRAC_PI_2, FRAC_PI_2);
    }

    /// Apply a wheel delta
    pub fn on_scroll(&mut self, dy: f32) {
        self.distance = self.clamp_distance(self.distance + dy * self.settings.scroll_sensitivity);
    }

    /// Apply an input event, returning whether the camera changed
    ///
    /// Pointer moves only orbit while the primary button is held.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let before = (self.pitch, self.yaw, self.distance);
        match event {
            InputEvent::PointerMove { buttons, dx, dy } => {
                if buttons & PRIMARY_BUTTON == 0 {
                    return false;
                }
                self.on_drag(dx, dy);
            }
            InputEvent::Wheel { dy } => self.on_scroll(dy),
        }
        before != (self.pitch, self.yaw, self.distance)
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return self.settings.distance_floor;
        }
        distance.clamp(self.settings.distance_floor, self.settings.distance_max)
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    pub fn up_axis(&self) -> UpAxis {
        self.up
    }

    /// Unit direction from the origin to the camera
    fn direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.up
            .compose(sin_yaw * cos_pitch, sin_pitch, cos_yaw * cos_pitch)
    }

    /// Camera position: `distance · (sin yaw cos pitch, sin pitch, cos yaw cos pitch)`
    /// in the Y-up frame
    pub fn position(&self) -> Vec3 {
        self.direction() * self.distance
    }

    /// Camera up vector: the derivative of the position direction with
    /// respect to pitch. Always perpendicular to the view direction, so the
    /// view stays well defined at `pitch = ±π/2`.
    pub fn up_vector(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.up
            .compose(-sin_yaw * sin_pitch, cos_pitch, -cos_yaw * sin_pitch)
    }

    /// View matrix looking at the origin
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), Vec3::ZERO, self.up_vector())
    }

    /// Perspective projection with GL depth range
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(FOV_Y, aspect, Z_NEAR, Z_FAR)
    }

    /// Combined view-projection matrix
    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix()
    }

    /// Copy of the current state for a renderer
    pub fn snapshot(&self) -> CameraSnapshot {
        CameraSnapshot {
            position: self.position(),
            pitch: self.pitch,
            yaw: self.yaw,
            distance: self.distance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn camera_at(distance: f32) -> OrbitCamera {
        OrbitCamera::new(
            CameraSettings {
                initial_distance: distance,
                ..Default::default()
            },
            UpAxis::Y,
        )
    }

    #[test]
    fn test_default_state() {
        let camera = OrbitCamera::default();
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.yaw(), 0.0);
        assert_eq!(camera.distance(), 5.0);
        assert_eq!(camera.position(), Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn test_position_formula() {
        let mut camera = camera_at(2.0);
        camera.on_drag(PI / 2.0 / 0.01, 0.0);
        assert!(camera.position().distance(Vec3::new(2.0, 0.0, 0.0)) < 1e-5);

        let mut camera = camera_at(3.0);
        camera.on_drag(0.0, 1e6);
        assert_eq!(camera.pitch(), FRAC_PI_2);
        assert!(camera.position().distance(Vec3::new(0.0, 3.0, 0.0)) < 1e-5);
    }

    #[test]
    fn test_position_z_up() {
        let mut camera = OrbitCamera::new(CameraSettings::default(), UpAxis::Z);
        assert!(camera.position().distance(Vec3::new(0.0, 5.0, 0.0)) < 1e-5);
        camera.on_drag(0.0, -1e6);
        assert!(camera.position().distance(Vec3::new(0.0, 0.0, -5.0)) < 1e-5);
    }

    #[test]
    fn test_drag_signs() {
        let mut camera = OrbitCamera::default();
        camera.on_drag(10.0, 5.0);
        assert!((camera.yaw() - 0.1).abs() < 1e-6);
        assert!((camera.pitch() - 0.05).abs() < 1e-6);

        let mut inverted = OrbitCamera::new(
            CameraSettings {
                yaw_direction: DragDirection::Inverted,
                pitch_direction: DragDirection::Inverted,
                ..Default::default()
            },
            UpAxis::Y,
        );
        inverted.on_drag(10.0, 5.0);
        assert!((inverted.yaw() + 0.1).abs() < 1e-6);
        assert!((inverted.pitch() + 0.05).abs() < 1e-6);
    }

    #[test]
    fn test_scroll_clamps_to_floor() {
        let mut camera = camera_at(10.0);
        camera.on_scroll(1000.0);
        camera.on_scroll(-2000.0);
        assert_eq!(camera.distance(), 1.0);
    }

    #[test]
    fn test_scroll_clamps_to_floor_at_unit_sensitivity() {
        let mut camera = OrbitCamera::new(
            CameraSettings {
                initial_distance: 10.0,
                scroll_sensitivity: 1.0,
                ..Default::default()
            },
            UpAxis::Y,
        );
        camera.on_scroll(1000.0);
        assert_eq!(camera.distance(), 100.0);
        camera.on_scroll(-2000.0);
        assert_eq!(camera.distance(), 1.0);
    }

    #[test]
    fn test_invariants_hold_over_input_sequence() {
        let mut camera = OrbitCamera::default();
        // Deterministic pseudo-random walk
        let mut state = 0x2545_f491_u32;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as f32 / u32::MAX as f32) * 2.0 - 1.0
        };

        for _ in 0..2000 {
            let (a, b) = (next(), next());
            if a > 0.0 {
                camera.on_drag(b * 400.0, next() * 400.0);
            } else {
                camera.on_scroll(b * 5000.0);
            }
            assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&camera.pitch()));
            assert!(camera.distance() >= 1.0);
            assert!(camera.distance() <= 100.0);
        }
    }

    #[test]
    fn test_non_finite_drag_is_ignored() {
        let mut camera = OrbitCamera::default();
        camera.on_drag(10.0, 20.0);
        let before = camera.snapshot();

        camera.on_drag(f32::NAN, 0.0);
        camera.on_drag(0.0, f32::NAN);
        camera.on_drag(f32::INFINITY, f32::NEG_INFINITY);
        assert_eq!(camera.snapshot(), before);
        assert!(!camera.handle_input(InputEvent::PointerMove {
            buttons: PRIMARY_BUTTON,
            dx: 0.0,
            dy: f32::NAN,
        }));
        assert!((-FRAC_PI_2..=FRAC_PI_2).contains(&camera.pitch()));

        let camera = OrbitCamera::new(
            CameraSettings {
                initial_pitch: f32::NAN,
                initial_yaw: f32::INFINITY,
                ..Default::default()
            },
            UpAxis::Y,
        );
        assert_eq!(camera.pitch(), 0.0);
        assert_eq!(camera.yaw(), 0.0);
    }

    #[test]
    fn test_pointer_move_requires_primary_button() {
        let mut camera = OrbitCamera::default();
        let moved = camera.handle_input(InputEvent::PointerMove {
            buttons: 2,
            dx: 50.0,
            dy: 50.0,
        });
        assert!(!moved);
        assert_eq!(camera.yaw(), 0.0);

        let moved = camera.handle_input(InputEvent::PointerMove {
            buttons: PRIMARY_BUTTON | 4,
            dx: 50.0,
            dy: 0.0,
        });
        assert!(moved);
        assert!((camera.yaw() - 0.5).abs() < 1e-6);

        assert!(camera.handle_input(InputEvent::Wheel { dy: 100.0 }));
        assert!((camera.distance() - 6.0).abs() < 1e-5);
    }

    #[test]
    fn test_up_vector_perpendicular_at_poles() {
        let mut camera = OrbitCamera::default();
        camera.on_drag(37.0, 1e6);
        let dir = camera.position().normalize();
        let up = camera.up_vector();
        assert!((up.length() - 1.0).abs() < 1e-5);
        assert!(dir.dot(up).abs() < 1e-5);
        assert!(!camera.view_matrix().is_nan());
    }

    #[test]
    fn test_view_matrix_maps_origin_in_front_of_camera() {
        let mut camera = OrbitCamera::default();
        camera.on_drag(80.0, 30.0);
        let origin_in_view = camera.view_matrix().transform_point3(Vec3::ZERO);
        // Right-handed view space looks down -Z
        assert!((origin_in_view.z + camera.distance()).abs() < 1e-4);
        assert!(origin_in_view.truncate().length() < 1e-4);

        let clip = camera.view_projection(1.0) * Vec3::ZERO.extend(1.0);
        let ndc_z = clip.z / clip.w;
        assert!((-1.0..=1.0).contains(&ndc_z));
    }

    #[test]
    fn test_invalid_settings_are_sanitized() {
        let camera = OrbitCamera::new(
            CameraSettings {
                distance_floor: -1.0,
                distance_max: 0.5,
                initial_distance: 0.1,
                ..Default::default()
            },
            UpAxis::Y,
        );
        assert_eq!(camera.settings().distance_floor, 1.0);
        assert_eq!(camera.settings().distance_max, 1.0);
        assert_eq!(camera.distance(), 1.0);
    }

    #[test]
    fn test_snapshot_and_reset() {
        let mut camera = OrbitCamera::default();
        camera.on_drag(20.0, 20.0);
        camera.on_scroll(300.0);
        let snap = camera.snapshot();
        assert_eq!(snap.position, camera.position());
        assert_eq!(snap.distance, camera.distance());

        camera.reset();
        assert_eq!(camera.snapshot().position, Vec3::new(0.0, 0.0, 5.0));
    }
}
