//! Unit bounding-box normalization

use glam::Vec3;
use tracing::warn;

use crate::mesh::bounds_of;

/// Extents at or below this are treated as a single point
const DEGENERATE_EXTENT: f32 = 1e-12;

/// Transform applied by [`normalize_to_unit_box`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitBoxTransform {
    /// Original bounding-box centre (subtracted from every vertex)
    pub center: Vec3,
    /// Uniform scale applied after centring (1.0 for degenerate input)
    pub scale: f32,
}

impl UnitBoxTransform {
    /// Identity transform
    pub const IDENTITY: Self = Self {
        center: Vec3::ZERO,
        scale: 1.0,
    };

    /// Map an original-space point into the normalized space
    pub fn apply(&self, p: Vec3) -> Vec3 {
        (p - self.center) * self.scale
    }
}

/// Centre positions on the origin and scale them so the largest bounding-box
/// extent becomes 1
///
/// Degenerate input (all points coincident) is only centred, not scaled.
pub fn normalize_to_unit_box(positions: &mut [Vec3]) -> UnitBoxTransform {
    let Some((min, max)) = bounds_of(positions.iter().copied()) else {
        return UnitBoxTransform::IDENTITY;
    };

    let center = (min + max) * 0.5;
    let max_extent = (max - min).max_element();
    let scale = if max_extent > DEGENERATE_EXTENT {
        1.0 / max_extent
    } else {
        warn!("normalize_to_unit_box: zero-extent input, centring without scaling");
        1.0
    };

    let transform = UnitBoxTransform { center, scale };
    for p in positions.iter_mut() {
        *p = transform.apply(*p);
    }
    transform
}
