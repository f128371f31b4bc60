//! Triangle soup: the shape handed over by asset parsers

use glam::Vec3;

use crate::error::{AssetLoadError, MeshImportError};

/// Unstructured triangle list as returned by an asset parser
///
/// Flat arrays, three floats per vertex and three entries per face. Parsers
/// emit one independent vertex triple per face; welding happens later.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleSoup {
    /// Vertex positions, flattened `[x0, y0, z0, x1, ...]`
    pub vertices: Vec<f32>,
    /// Per-face normals, flattened, three floats per face (may be empty)
    pub face_normals: Vec<f32>,
    /// Vertex indices, three per face
    pub face_indices: Vec<u32>,
}

impl TriangleSoup {
    /// Create an empty soup
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a face with its own three vertices and an optional normal
    pub fn push_face(&mut self, corners: [Vec3; 3], normal: Option<Vec3>) {
        let base = (self.vertices.len() / 3) as u32;
        for corner in corners {
            self.vertices.extend_from_slice(&corner.to_array());
        }
        self.face_indices.extend_from_slice(&[base, base + 1, base + 2]);
        if let Some(n) = normal {
            self.face_normals.extend_from_slice(&n.to_array());
        }
    }

    /// Number of vertices in the flat vertex array
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Number of faces
    pub fn face_count(&self) -> usize {
        self.face_indices.len() / 3
    }

    /// Vertex positions as vectors
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
    }

    /// Supplied normal of a face, if any
    pub fn face_normal(&self, face: usize) -> Option<Vec3> {
        let n = self.face_normals.get(face * 3..face * 3 + 3)?;
        Some(Vec3::new(n[0], n[1], n[2]))
    }

    /// Check that the soup is structurally sound
    ///
    /// Bad triangle structure is a [`MeshImportError`]; a normal array that
    /// does not line up with the faces means the parser broke its contract
    /// and is reported as an [`AssetLoadError`].
    pub fn validate(&self) -> Result<(), super::ImportError> {
        if self.vertices.len() % 3 != 0 {
            return Err(MeshImportError::VertexDataNotMultipleOfThree(self.vertices.len()).into());
        }
        if self.face_indices.len() % 3 != 0 {
            return Err(
                MeshImportError::IndexCountNotMultipleOfThree(self.face_indices.len()).into(),
            );
        }
        if self.face_indices.is_empty() {
            return Err(MeshImportError::Empty.into());
        }

        let vertex_count = self.vertex_count();
        if let Some(&index) = self
            .face_indices
            .iter()
            .find(|&&i| i as usize >= vertex_count)
        {
            return Err(MeshImportError::IndexOutOfRange {
                index,
                vertex_count,
            }
            .into());
        }

        if !self.face_normals.is_empty() && self.face_normals.len() != self.face_indices.len() {
            return Err(AssetLoadError::ContractViolation(format!(
                "{} face normal floats for {} faces (expected {})",
                self.face_normals.len(),
                self.face_count(),
                self.face_count() * 3
            ))
            .into());
        }

        Ok(())
    }
}
