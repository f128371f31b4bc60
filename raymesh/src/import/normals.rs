//! Smooth per-vertex normals by face-normal accumulation
//!
//! Each face contributes its unit normal once to each of its three vertices,
//! regardless of face area. Area-weighted accumulation smooths differently on
//! irregular tessellations and is deliberately not used here.

use glam::Vec3;

use crate::error::DegenerateNormalWarning;

/// Unit normal of a face
///
/// Uses the supplied normal when it is finite and non-zero, otherwise the
/// normalized cross product of the edges (counter-clockwise winding). Returns
/// zero for a zero-area face without a usable supplied normal.
pub fn face_normal(corners: [Vec3; 3], supplied: Option<Vec3>) -> Vec3 {
    if let Some(n) = supplied.and_then(|n| n.try_normalize()) {
        return n;
    }
    let [a, b, c] = corners;
    (b - a).cross(c - a).normalize_or_zero()
}

/// Per-vertex normals plus the vertices whose accumulated normal vanished
#[derive(Debug, Clone, PartialEq)]
pub struct VertexNormals {
    /// One normal per vertex: unit length, or zero for degenerate vertices
    pub normals: Vec<Vec3>,
    /// Vertices with a zero accumulated normal
    pub degenerate: Vec<DegenerateNormalWarning>,
}

/// Accumulate face normals into per-vertex normals
///
/// `face_normals`, when given, holds one supplied normal per face. A vertex
/// touched by no face, or whose contributions cancel, gets the zero vector.
pub fn accumulate_vertex_normals(
    positions: &[Vec3],
    indices: &[u32],
    face_normals: Option<&[Vec3]>,
) -> VertexNormals {
    let mut sums = vec![Vec3::ZERO; positions.len()];

    for (face, tri) in indices.chunks_exact(3).enumerate() {
        let corners = [
            positions[tri[0] as usize],
            positions[tri[1] as usize],
            positions[tri[2] as usize],
        ];
        let supplied = face_normals.and_then(|normals| normals.get(face).copied());
        let n = face_normal(corners, supplied);
        for &i in tri {
            sums[i as usize] += n;
        }
    }

    let mut degenerate = Vec::new();
    let normals = sums
        .into_iter()
        .enumerate()
        .map(|(i, sum)| {
            let n = sum.normalize_or_zero();
            if n == Vec3::ZERO {
                degenerate.push(DegenerateNormalWarning { vertex: i as u32 });
            }
            n
        })
        .collect();

    VertexNormals {
        normals,
        degenerate,
    }
}
