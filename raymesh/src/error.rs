//! Error types for mesh import
//!
//! Both error kinds are terminal for a viewer session: the asset is a static
//! resource, so retrying cannot change the outcome.

use std::path::PathBuf;

use thiserror::Error;

/// The asset could not be fetched, read or parsed into a triangle soup.
#[derive(Error, Debug)]
pub enum AssetLoadError {
    #[error("Failed to read asset {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse asset: {0}")]
    Parse(String),

    #[error("Asset parser returned an unexpected shape: {0}")]
    ContractViolation(String),

    #[error("Asset import task failed: {0}")]
    TaskFailed(String),
}

/// The triangle soup is structurally invalid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshImportError {
    #[error("Index count {0} is not a multiple of 3")]
    IndexCountNotMultipleOfThree(usize),

    #[error("Vertex data length {0} is not a multiple of 3")]
    VertexDataNotMultipleOfThree(usize),

    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },

    #[error("Mesh has {vertices} vertices but {normals} normals")]
    NormalCountMismatch { vertices: usize, normals: usize },

    #[error("Mesh has no triangles")]
    Empty,
}

/// Any failure of the import pipeline.
#[derive(Error, Debug)]
pub enum ImportError {
    #[error(transparent)]
    Asset(#[from] AssetLoadError),

    #[error(transparent)]
    Mesh(#[from] MeshImportError),
}

/// A vertex whose accumulated face normals summed to zero.
///
/// Not an error: it is logged and the vertex receives a substitute normal
/// according to the import's `DegenerateNormalPolicy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateNormalWarning {
    /// Index of the affected vertex in the welded mesh
    pub vertex: u32,
}

impl std::fmt::Display for DegenerateNormalWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "vertex {} has a degenerate normal", self.vertex)
    }
}
