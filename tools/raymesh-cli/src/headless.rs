//! Render boundary without a GPU
//!
//! Keeps the last bound mesh and camera position so commands can report
//! what a renderer would have drawn.

use raymesh::{MeshUpload, RenderBoundary};
use tracing::debug;

#[derive(Debug, Default)]
pub struct HeadlessBoundary {
    pub mesh: MeshUpload,
    pub camera_position: [f32; 3],
    /// Number of `upload_mesh` calls
    pub uploads: usize,
    /// Every camera position pushed, in order
    pub camera_trace: Vec<[f32; 3]>,
}

impl RenderBoundary for HeadlessBoundary {
    fn upload_mesh(&mut self, mesh: &MeshUpload) {
        debug!("upload_mesh: {} triangles", mesh.triangle_count);
        self.mesh = mesh.clone();
        self.uploads += 1;
    }

    fn set_camera_position(&mut self, position: [f32; 3]) {
        self.camera_position = position;
        self.camera_trace.push(position);
    }
}
