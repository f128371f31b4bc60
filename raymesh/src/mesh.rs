//! Mesh types
//!
//! Shared triangle mesh representation produced by the sphere generator and
//! the STL importer and consumed by the upload adapter.

use glam::Vec3;

use crate::error::MeshImportError;

/// Trait for mesh construction - lets procedural generators stay generic
/// over the output container
pub trait MeshBuilder: Default {
    /// Add a vertex with position and normal, returning its index
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32;

    /// Add a triangle using three vertex indices
    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32);
}

/// Indexed triangle mesh with per-vertex normals (f32 format)
///
/// Invariants (checked by [`Mesh::validate`]):
/// - `vertices.len() == normals.len()`
/// - `indices.len() % 3 == 0`
/// - every index is `< vertices.len()`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions as [x, y, z]
    pub vertices: Vec<[f32; 3]>,
    /// Vertex normals as [x, y, z], index-aligned with `vertices`
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices, three per triangle
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mesh with room for the given counts
    pub fn with_capacity(vertex_count: usize, triangle_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            normals: Vec::with_capacity(vertex_count),
            indices: Vec::with_capacity(triangle_count * 3),
        }
    }

    /// Get vertex count
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get triangle count
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh has no triangles
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate triangles as index triples
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    /// Axis-aligned bounding box as `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        bounds_of(self.vertices.iter().map(|&v| Vec3::from(v)))
    }

    /// Check the structural invariants
    pub fn validate(&self) -> Result<(), MeshImportError> {
        if self.vertices.len() != self.normals.len() {
            return Err(MeshImportError::NormalCountMismatch {
                vertices: self.vertices.len(),
                normals: self.normals.len(),
            });
        }
        if self.indices.len() % 3 != 0 {
            return Err(MeshImportError::IndexCountNotMultipleOfThree(
                self.indices.len(),
            ));
        }
        let vertex_count = self.vertices.len();
        if let Some(&index) = self.indices.iter().find(|&&i| i as usize >= vertex_count) {
            return Err(MeshImportError::IndexOutOfRange {
                index,
                vertex_count,
            });
        }
        Ok(())
    }
}

impl MeshBuilder for Mesh {
    fn add_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn add_triangle(&mut self, i0: u32, i1: u32, i2: u32) {
        self.indices.extend_from_slice(&[i0, i1, i2]);
    }
}

/// Bounding box of a point set, `None` when empty
pub(crate) fn bounds_of(points: impl IntoIterator<Item = Vec3>) -> Option<(Vec3, Vec3)> {
    points.into_iter().fold(None, |acc, p| match acc {
        None => Some((p, p)),
        Some((min, max)) => Some((min.min(p), max.max(p))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.add_vertex(Vec3::ZERO, Vec3::Z);
        let b = mesh.add_vertex(Vec3::X, Vec3::Z);
        let c = mesh.add_vertex(Vec3::Y, Vec3::Z);
        mesh.add_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_builder_returns_sequential_indices() {
        let mesh = triangle();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_bounds() {
        let mesh = triangle();
        let (min, max) = mesh.bounds().unwrap();
        assert_eq!(min, Vec3::ZERO);
        assert_eq!(max, Vec3::new(1.0, 1.0, 0.0));
        assert!(Mesh::new().bounds().is_none());
    }

    #[test]
    fn test_validate_rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.indices[2] = 7;
        assert_eq!(
            mesh.validate(),
            Err(MeshImportError::IndexOutOfRange {
                index: 7,
                vertex_count: 3
            })
        );
    }

    #[test]
    fn test_validate_rejects_partial_triangle() {
        let mut mesh = triangle();
        mesh.indices.push(0);
        assert_eq!(
            mesh.validate(),
            Err(MeshImportError::IndexCountNotMultipleOfThree(4))
        );
    }

    #[test]
    fn test_validate_rejects_misaligned_normals() {
        let mut mesh = triangle();
        mesh.normals.pop();
        assert!(matches!(
            mesh.validate(),
            Err(MeshImportError::NormalCountMismatch { .. })
        ));
    }
}
