//! Vertex welding
//!
//! Merges geometrically coincident vertices into one shared vertex using a
//! spatial hash with cell size equal to the weld epsilon. A vertex joins the
//! first canonical vertex found within epsilon (Euclidean); otherwise it
//! becomes canonical itself. Canonical positions are never moved, so the
//! first occurrence wins and canonical vertices stay more than epsilon
//! apart, which makes welding idempotent.

use glam::{I64Vec3, Vec3};
use hashbrown::HashMap;
use smallvec::SmallVec;

/// Default weld tolerance in model units
pub const DEFAULT_WELD_EPSILON: f32 = 1e-5;

/// Result of welding a vertex set
#[derive(Debug, Clone, PartialEq)]
pub struct Welded {
    /// Canonical vertex positions, in first-occurrence order
    pub positions: Vec<Vec3>,
    /// Input vertex index -> canonical vertex index
    pub remap: Vec<u32>,
}

impl Welded {
    /// Rewrite an index buffer through the remap table
    pub fn remap_indices(&self, indices: &[u32]) -> Vec<u32> {
        indices.iter().map(|&i| self.remap[i as usize]).collect()
    }
}

/// Weld coincident positions
///
/// `epsilon <= 0` (or non-finite) welds only bit-identical positions.
pub fn weld_vertices(positions: &[Vec3], epsilon: f32) -> Welded {
    let exact = !(epsilon.is_finite() && epsilon > 0.0);
    let cell_size = if exact { 1.0 } else { epsilon };

    let mut grid: HashMap<I64Vec3, SmallVec<[u32; 4]>> = HashMap::with_capacity(positions.len());
    let mut canonical: Vec<Vec3> = Vec::new();
    let mut remap = Vec::with_capacity(positions.len());

    for &p in positions {
        let cell = cell_of(p, cell_size);
        let found = if exact {
            grid.get(&cell).and_then(|bucket| {
                bucket
                    .iter()
                    .copied()
                    .find(|&c| canonical[c as usize] == p)
            })
        } else {
            find_within(&grid, &canonical, cell, p, epsilon)
        };

        let index = match found {
            Some(index) => index,
            None => {
                let index = canonical.len() as u32;
                canonical.push(p);
                grid.entry(cell).or_default().push(index);
                index
            }
        };
        remap.push(index);
    }

    Welded {
        positions: canonical,
        remap,
    }
}

/// Cell key in 64-bit space; cells past the `i64` range saturate at its ends
fn cell_of(p: Vec3, cell_size: f32) -> I64Vec3 {
    (p / cell_size).floor().as_i64vec3()
}

/// First canonical vertex (lowest index) within `epsilon` of `p`
fn find_within(
    grid: &HashMap<I64Vec3, SmallVec<[u32; 4]>>,
    canonical: &[Vec3],
    cell: I64Vec3,
    p: Vec3,
    epsilon: f32,
) -> Option<u32> {
    let epsilon_sq = epsilon * epsilon;
    let mut best: Option<u32> = None;

    for dz in -1..=1 {
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(bucket) = grid.get(&cell.saturating_add(I64Vec3::new(dx, dy, dz))) else {
                    continue;
                };
                for &c in bucket {
                    if canonical[c as usize].distance_squared(p) <= epsilon_sq
                        && best.is_none_or(|b| c < b)
                    {
                        best = Some(c);
                    }
                }
            }
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_coincident_vertices_merge() {
        let positions = [Vec3::ZERO, Vec3::new(0.0, 0.0, 1e-7), Vec3::X];
        let welded = weld_vertices(&positions, 1e-5);

        assert_eq!(welded.positions.len(), 2);
        assert_eq!(welded.remap, vec![0, 0, 1]);
        // First occurrence is the canonical position
        assert_eq!(welded.positions[0], Vec3::ZERO);

        let indices = welded.remap_indices(&[0, 1, 2, 1, 0, 2]);
        assert_eq!(indices, vec![0, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_vertices_beyond_epsilon_stay_separate() {
        let positions = [Vec3::ZERO, Vec3::new(2e-5, 0.0, 0.0)];
        let welded = weld_vertices(&positions, 1e-5);
        assert_eq!(welded.positions.len(), 2);
        assert_eq!(welded.remap, vec![0, 1]);
    }

    #[test]
    fn test_merge_across_cell_boundary() {
        // Straddle the cell boundary at x = 0
        let positions = [Vec3::new(-2e-6, 0.0, 0.0), Vec3::new(2e-6, 0.0, 0.0)];
        let welded = weld_vertices(&positions, 1e-5);
        assert_eq!(welded.positions.len(), 1);
    }

    #[test]
    fn test_first_occurrence_wins_between_two_candidates() {
        // c is within epsilon of both a and b; a came first
        let a = Vec3::ZERO;
        let b = Vec3::new(1.5e-5, 0.0, 0.0);
        let c = Vec3::new(0.8e-5, 0.0, 0.0);
        let welded = weld_vertices(&[a, b, c], 1e-5);
        assert_eq!(welded.positions, vec![a, b]);
        assert_eq!(welded.remap, vec![0, 1, 0]);
    }

    #[test]
    fn test_weld_is_idempotent() {
        // Jittered grid with many near duplicates
        let mut positions = Vec::new();
        for i in 0..6 {
            for j in 0..6 {
                let base = Vec3::new(i as f32 * 0.1, j as f32 * 0.1, (i * j) as f32 * 0.01);
                positions.push(base);
                positions.push(base + Vec3::splat(3e-6));
                positions.push(base - Vec3::new(0.0, 4e-6, 0.0));
            }
        }

        let once = weld_vertices(&positions, 1e-5);
        let twice = weld_vertices(&once.positions, 1e-5);

        assert_eq!(once.positions.len(), 36);
        assert_eq!(twice.positions, once.positions);
        assert_eq!(twice.remap, (0..once.positions.len() as u32).collect::<Vec<_>>());
    }

    #[test]
    fn test_large_coordinates_do_not_overflow_cells() {
        // 3e4 / 1e-5 is past the i32 range
        let a = Vec3::new(30000.0, 0.0, 0.0);
        let b = Vec3::new(30000.0, 1.0, 0.0);
        let welded = weld_vertices(&[a, b, a, -a], 1e-5);
        assert_eq!(welded.positions, vec![a, b, -a]);
        assert_eq!(welded.remap, vec![0, 1, 0, 2]);

        // Saturated cells still only merge points within epsilon
        let far = Vec3::new(1e30, -1e30, 1e30);
        let other = Vec3::new(1e30, -1e30, 2e30);
        let welded = weld_vertices(&[far, other, far], 1e-5);
        assert_eq!(welded.positions, vec![far, other]);
        assert_eq!(welded.remap, vec![0, 1, 0]);
    }

    #[test]
    fn test_zero_epsilon_welds_exact_duplicates_only() {
        let positions = [Vec3::ONE, Vec3::ONE, Vec3::new(1.0, 1.0, 1.0 + 1e-6)];
        let welded = weld_vertices(&positions, 0.0);
        assert_eq!(welded.remap, vec![0, 0, 1]);
    }
}
