//! raymesh - mesh preparation and camera state for a GPU mesh ray tracer
//!
//! Produces the CPU-side inputs of a fragment-shader ray tracer:
//! - [`procedural`]: UV-sphere generation
//! - [`import`]: STL triangle soup import (weld, unit box, smooth normals)
//! - [`upload`]: marshaling into the vertex/normal/index arrays the shader reads
//! - [`camera`]: orbit camera driven by pointer drag and wheel input
//! - [`loader`]: background STL loading with generation-tagged results
//!
//! [`session::DemoSession`] ties these together for a single viewer session.

pub mod axis;
pub mod camera;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod loader;
pub mod mesh;
pub mod procedural;
pub mod session;
pub mod upload;

pub use axis::UpAxis;
pub use camera::{CameraSettings, CameraSnapshot, DragDirection, InputEvent, OrbitCamera};
pub use config::{ConfigError, SphereConfig, ViewerConfig};
pub use error::{AssetLoadError, DegenerateNormalWarning, ImportError, MeshImportError};
pub use export::write_obj;
pub use import::{
    DegenerateNormalPolicy, ImportOptions, ImportReport, ImportedMesh, TriangleSoup, import_soup,
    import_stl_bytes, import_stl_file,
};
pub use loader::{LoadOutcome, MeshLoader};
pub use mesh::{Mesh, MeshBuilder};
pub use procedural::generate_sphere;
pub use session::{DemoSession, ImportStatus};
pub use upload::{MeshUpload, RenderBoundary};
