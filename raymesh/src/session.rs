//! Demo session
//!
//! Owns the camera, the mesh currently bound to the renderer and the import
//! loader for one viewer session, and pushes changes through the
//! [`RenderBoundary`].

use std::path::PathBuf;

use tracing::{error, info};

use crate::camera::{InputEvent, OrbitCamera};
use crate::config::ViewerConfig;
use crate::error::{AssetLoadError, ImportError};
use crate::import::ImportReport;
use crate::loader::{LoadOutcome, MeshLoader};
use crate::mesh::Mesh;
use crate::procedural::generate_sphere;
use crate::upload::{MeshUpload, RenderBoundary};

/// State of the most recent import
#[derive(Debug, Default)]
pub enum ImportStatus {
    /// No import requested
    #[default]
    Idle,
    /// Waiting on the given generation; the placeholder is bound
    Pending { generation: u64, path: PathBuf },
    /// The imported mesh is bound
    Loaded { path: PathBuf, report: ImportReport },
    /// The import failed; the placeholder stays bound
    Failed { path: PathBuf, error: ImportError },
}

/// One viewer session
pub struct DemoSession<B: RenderBoundary> {
    config: ViewerConfig,
    camera: OrbitCamera,
    boundary: B,
    upload: MeshUpload,
    loader: Option<MeshLoader>,
    status: ImportStatus,
}

impl<B: RenderBoundary> DemoSession<B> {
    /// Start a session: binds the placeholder mesh and initial camera position
    pub fn new(config: ViewerConfig, boundary: B) -> Self {
        let camera = OrbitCamera::new(config.camera, config.up);
        let mut session = Self {
            config,
            camera,
            boundary,
            upload: MeshUpload::placeholder(),
            loader: None,
            status: ImportStatus::Idle,
        };
        session.boundary.upload_mesh(&session.upload);
        session.push_camera();
        session
    }

    /// Start a session that imports through the given loader
    pub fn with_loader(config: ViewerConfig, boundary: B, loader: MeshLoader) -> Self {
        let mut session = Self::new(config, boundary);
        session.loader = Some(loader);
        session
    }

    /// Generate the configured sphere and bind it
    ///
    /// Supersedes any import still in flight.
    pub fn show_sphere(&mut self) {
        if let Some(loader) = self.loader.as_mut() {
            loader.supersede();
        }
        self.status = ImportStatus::Idle;

        let sphere = &self.config.sphere;
        let mesh: Mesh = generate_sphere(sphere.lat_bands, sphere.lon_bands, self.config.up);
        info!(
            "Showing sphere: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        self.bind(MeshUpload::from_mesh(&mesh));
    }

    /// Start importing an STL file
    ///
    /// Binds the placeholder until the import resolves and supersedes any
    /// import still in flight. Returns the request's generation.
    pub fn request_import(&mut self, path: impl Into<PathBuf>) -> Result<u64, AssetLoadError> {
        let path = path.into();
        let options = self.config.import_options();
        let loader = match self.loader.take() {
            Some(loader) => loader,
            None => MeshLoader::new().map_err(|e| {
                AssetLoadError::TaskFailed(format!("failed to start loader runtime: {e}"))
            })?,
        };
        let loader = self.loader.insert(loader);
        let generation = loader.request(path.clone(), options);
        self.status = ImportStatus::Pending { generation, path };
        self.bind(MeshUpload::placeholder());
        Ok(generation)
    }

    /// Apply the latest import outcome if it has arrived
    ///
    /// Returns true if the session state changed.
    pub fn poll_loader(&mut self) -> bool {
        match self.loader.as_mut().and_then(MeshLoader::try_latest) {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    /// Block until the latest import resolves and apply it
    ///
    /// Must not be called from inside an async context.
    pub fn wait_for_import(&mut self) -> bool {
        if !matches!(self.status, ImportStatus::Pending { .. }) {
            return false;
        }
        match self.loader.as_mut().and_then(MeshLoader::wait_latest) {
            Some(outcome) => {
                self.apply(outcome);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, outcome: LoadOutcome) {
        let LoadOutcome { path, result, .. } = outcome;
        match result {
            Ok(imported) => {
                self.bind(MeshUpload::from_mesh(&imported.mesh));
                self.status = ImportStatus::Loaded {
                    path,
                    report: imported.report,
                };
            }
            Err(error) => {
                error!("Import of {} failed: {}", path.display(), error);
                self.status = ImportStatus::Failed { path, error };
            }
        }
    }

    /// Forward an input event to the camera
    ///
    /// Pushes the new camera position when the event moved the camera.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let changed = self.camera.handle_input(event);
        if changed {
            self.push_camera();
        }
        changed
    }

    /// Reset the camera to its configured initial state
    pub fn reset_camera(&mut self) {
        self.camera.reset();
        self.push_camera();
    }

    fn bind(&mut self, upload: MeshUpload) {
        self.upload = upload;
        self.boundary.upload_mesh(&self.upload);
    }

    fn push_camera(&mut self) {
        self.boundary
            .set_camera_position(self.camera.position().to_array());
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Mesh currently bound to the renderer
    pub fn current_upload(&self) -> &MeshUpload {
        &self.upload
    }

    pub fn status(&self) -> &ImportStatus {
        &self.status
    }

    /// Error of the most recent import, if it failed
    pub fn last_error(&self) -> Option<&ImportError> {
        match &self.status {
            ImportStatus::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn boundary_mut(&mut self) -> &mut B {
        &mut self.boundary
    }
}
