//! Mesh upload adapter
//!
//! Marshals a [`Mesh`] into the three arrays the ray-tracing shader reads
//! (vertices, normals, index triples) plus the triangle count, and defines
//! the rendering boundary those arrays are handed to.

use bytemuck::cast_slice;

use crate::mesh::Mesh;

/// Shader-facing mesh arrays
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshUpload {
    /// Vertex positions, one triple per vertex
    pub vertex_buffer: Vec<[f32; 3]>,
    /// Vertex normals, index-aligned with `vertex_buffer`
    pub normal_buffer: Vec<[f32; 3]>,
    /// Triangles as vertex index triples
    pub index_buffer: Vec<[u32; 3]>,
    /// `index_buffer.len()`, i.e. flat index count / 3
    pub triangle_count: u32,
}

impl MeshUpload {
    /// Marshal a mesh
    ///
    /// A trailing partial triangle cannot occur for a validated mesh; if one
    /// is present it is dropped rather than padded.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        let index_buffer: Vec<[u32; 3]> = mesh.triangles().collect();
        Self {
            vertex_buffer: mesh.vertices.clone(),
            normal_buffer: mesh.normals.clone(),
            triangle_count: index_buffer.len() as u32,
            index_buffer,
        }
    }

    /// Empty mesh displayed while an import is pending or after it failed
    pub fn placeholder() -> Self {
        Self::default()
    }

    /// Whether there is nothing to draw
    pub fn is_placeholder(&self) -> bool {
        self.triangle_count == 0
    }

    /// Vertex buffer as raw bytes (little-endian f32 triples)
    pub fn vertex_bytes(&self) -> &[u8] {
        cast_slice(&self.vertex_buffer)
    }

    /// Normal buffer as raw bytes
    pub fn normal_bytes(&self) -> &[u8] {
        cast_slice(&self.normal_buffer)
    }

    /// Index buffer as raw bytes (u32 triples)
    pub fn index_bytes(&self) -> &[u8] {
        cast_slice(&self.index_buffer)
    }

    /// Flat f32 view of the vertex buffer, as uniform arrays expect
    pub fn vertex_floats(&self) -> &[f32] {
        cast_slice(&self.vertex_buffer)
    }

    /// Flat f32 view of the normal buffer
    pub fn normal_floats(&self) -> &[f32] {
        cast_slice(&self.normal_buffer)
    }

    /// Flat u32 view of the index buffer
    pub fn index_values(&self) -> &[u32] {
        cast_slice(&self.index_buffer)
    }
}

impl From<&Mesh> for MeshUpload {
    fn from(mesh: &Mesh) -> Self {
        Self::from_mesh(mesh)
    }
}

/// Rendering boundary
///
/// Implemented by the windowing/shader glue. Each call binds data for the
/// next draw; the implementor owns uniform locations and GPU resources.
pub trait RenderBoundary {
    /// Bind mesh arrays and triangle count
    fn upload_mesh(&mut self, mesh: &MeshUpload);

    /// Bind the camera position uniform
    fn set_camera_position(&mut self, position: [f32; 3]);
}
