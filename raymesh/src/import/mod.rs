//! Triangle soup import
//!
//! Turns an STL asset (or any parser output shaped as a [`TriangleSoup`])
//! into a [`Mesh`] ready for the ray tracer:
//! 1. validate the soup
//! 2. weld coincident vertices
//! 3. centre and scale into a unit bounding box
//! 4. accumulate smooth per-vertex normals

mod bounds;
mod normals;
mod soup;
pub mod stl;
mod weld;

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::axis::UpAxis;
use crate::error::{AssetLoadError, DegenerateNormalWarning, ImportError};
use crate::mesh::Mesh;

pub use bounds::{UnitBoxTransform, normalize_to_unit_box};
pub use normals::{VertexNormals, accumulate_vertex_normals, face_normal};
pub use soup::TriangleSoup;
pub use weld::{DEFAULT_WELD_EPSILON, Welded, weld_vertices};

/// What to put in place of a zero accumulated normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateNormalPolicy {
    /// Leave the zero vector in place
    Zero,
    /// Use the direction from the origin to the vertex (the up axis for a
    /// vertex at the origin)
    #[default]
    PositionDirection,
}

/// Import tuning
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Weld tolerance (default: 1e-5)
    #[serde(default = "default_weld_epsilon")]
    pub weld_epsilon: f32,
    /// Degenerate normal handling (default: position direction)
    #[serde(default)]
    pub degenerate_normals: DegenerateNormalPolicy,
    /// Up axis used as the last-resort substitute normal (default: Y)
    #[serde(default)]
    pub up: UpAxis,
}

fn default_weld_epsilon() -> f32 {
    DEFAULT_WELD_EPSILON
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            weld_epsilon: default_weld_epsilon(),
            degenerate_normals: DegenerateNormalPolicy::default(),
            up: UpAxis::default(),
        }
    }
}

/// Statistics and warnings from an import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    /// Vertices in the soup before welding
    pub input_vertices: usize,
    /// Vertices after welding
    pub welded_vertices: usize,
    /// Triangles in the output
    pub triangles: usize,
    /// Centre/scale applied to reach the unit box
    pub transform: UnitBoxTransform,
    /// Vertices whose normals were degenerate
    pub degenerate_normals: Vec<DegenerateNormalWarning>,
}

/// Imported mesh plus its report
#[derive(Debug, Clone)]
pub struct ImportedMesh {
    pub mesh: Mesh,
    pub report: ImportReport,
}

/// Run the import pipeline on a parsed soup
pub fn import_soup(soup: &TriangleSoup, options: &ImportOptions) -> Result<ImportedMesh, ImportError> {
    soup.validate()?;

    let input: Vec<Vec3> = soup.positions().collect();
    let welded = weld_vertices(&input, options.weld_epsilon);
    let indices = welded.remap_indices(&soup.face_indices);
    let mut positions = welded.positions;
    debug!(
        "Welded {} vertices into {} (epsilon {})",
        input.len(),
        positions.len(),
        options.weld_epsilon
    );

    let transform = normalize_to_unit_box(&mut positions);

    let supplied: Option<Vec<Vec3>> = (!soup.face_normals.is_empty()).then(|| {
        (0..soup.face_count())
            .filter_map(|face| soup.face_normal(face))
            .collect()
    });
    let VertexNormals {
        mut normals,
        degenerate,
    } = accumulate_vertex_normals(&positions, &indices, supplied.as_deref());

    for warning in &degenerate {
        let i = warning.vertex as usize;
        warn!("Degenerate normal at {} ({:?})", warning, positions[i]);
        if options.degenerate_normals == DegenerateNormalPolicy::PositionDirection {
            normals[i] = positions[i].try_normalize().unwrap_or(options.up.up());
        }
    }

    let mesh = Mesh {
        vertices: positions.iter().map(|p| p.to_array()).collect(),
        normals: normals.iter().map(|n| n.to_array()).collect(),
        indices,
    };

    let report = ImportReport {
        input_vertices: input.len(),
        welded_vertices: mesh.vertex_count(),
        triangles: mesh.triangle_count(),
        transform,
        degenerate_normals: degenerate,
    };

    Ok(ImportedMesh { mesh, report })
}

/// Parse STL bytes and import them
pub fn import_stl_bytes(data: &[u8], options: &ImportOptions) -> Result<ImportedMesh, ImportError> {
    let soup = stl::parse_stl(data)?;
    import_soup(&soup, options)
}

/// Read an STL file and import it
pub fn import_stl_file(path: &Path, options: &ImportOptions) -> Result<ImportedMesh, ImportError> {
    let data = std::fs::read(path).map_err(|source| AssetLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let imported = import_stl_bytes(&data, options)?;
    info!(
        "Imported {}: {} triangles, {} -> {} vertices",
        path.display(),
        imported.report.triangles,
        imported.report.input_vertices,
        imported.report.welded_vertices
    );
    Ok(imported)
}
