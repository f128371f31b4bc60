//! Background mesh loading
//!
//! Imports run off the caller's thread: the file is read with `tokio::fs`
//! and parsed on a blocking task. Results come back over a channel tagged
//! with the generation of the request that produced them, so a caller can
//! ignore anything but the most recent request.

use std::path::PathBuf;

use tokio::runtime::{Handle, Runtime};
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{AssetLoadError, ImportError};
use crate::import::{ImportOptions, ImportedMesh, import_stl_bytes};

/// Result of one import request
#[derive(Debug)]
pub struct LoadOutcome {
    /// Generation returned by the [`MeshLoader::request`] call
    pub generation: u64,
    /// Source path of the request
    pub path: PathBuf,
    pub result: Result<ImportedMesh, ImportError>,
}

/// Spawns imports and collects their outcomes
pub struct MeshLoader {
    /// Runtime owned by this loader, if it was not given a handle
    runtime: Option<Runtime>,
    handle: Handle,
    tx: mpsc::UnboundedSender<LoadOutcome>,
    rx: mpsc::UnboundedReceiver<LoadOutcome>,
    generation: u64,
}

impl MeshLoader {
    /// Create a loader with its own single-worker runtime
    pub fn new() -> std::io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("raymesh-loader")
            .build()?;
        let handle = runtime.handle().clone();
        Ok(Self::build(Some(runtime), handle))
    }

    /// Create a loader that spawns onto an existing runtime
    pub fn with_handle(handle: Handle) -> Self {
        Self::build(None, handle)
    }

    fn build(runtime: Option<Runtime>, handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            handle,
            tx,
            rx,
            generation: 0,
        }
    }

    /// Generation of the most recent request (0 before any request)
    pub fn latest_generation(&self) -> u64 {
        self.generation
    }

    /// Start importing `path`, superseding any earlier request
    ///
    /// Returns the generation tag of this request.
    pub fn request(&mut self, path: impl Into<PathBuf>, options: ImportOptions) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        let path = path.into();
        let tx = self.tx.clone();
        debug!("Import #{} requested: {}", generation, path.display());

        self.handle.spawn(async move {
            let result = load(path.clone(), options).await;
            // Receiver gone means the owner was dropped; nothing left to notify
            let _ = tx.send(LoadOutcome {
                generation,
                path,
                result,
            });
        });
        generation
    }

    /// Invalidate any request in flight without starting a new one
    ///
    /// Its outcome will be discarded when it arrives.
    pub fn supersede(&mut self) {
        self.generation += 1;
        debug!("Imports up to #{} superseded", self.generation - 1);
    }

    /// Drain finished imports without blocking
    ///
    /// Returns the outcome of the latest request if it has arrived. Outcomes
    /// of superseded requests are discarded.
    pub fn try_latest(&mut self) -> Option<LoadOutcome> {
        let mut latest = None;
        while let Ok(outcome) = self.rx.try_recv() {
            if outcome.generation == self.generation {
                latest = Some(outcome);
            } else {
                debug!("Discarding superseded import #{}", outcome.generation);
            }
        }
        latest
    }

    /// Wait for the outcome of the latest request
    ///
    /// Superseded outcomes received in the meantime are discarded. Returns
    /// `None` if no request has been made.
    pub async fn next_latest(&mut self) -> Option<LoadOutcome> {
        if self.generation == 0 {
            return None;
        }
        while let Some(outcome) = self.rx.recv().await {
            if outcome.generation == self.generation {
                return Some(outcome);
            }
            debug!("Discarding superseded import #{}", outcome.generation);
        }
        None
    }

    /// Block the calling thread until the latest request resolves
    ///
    /// Only valid for loaders that own their runtime; must not be called
    /// from inside an async context.
    pub fn wait_latest(&mut self) -> Option<LoadOutcome> {
        if self.runtime.is_none() {
            return self.try_latest();
        }
        let handle = self.handle.clone();
        handle.block_on(self.next_latest())
    }
}

impl Drop for MeshLoader {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}

async fn load(path: PathBuf, options: ImportOptions) -> Result<ImportedMesh, ImportError> {
    let data = tokio::fs::read(&path)
        .await
        .map_err(|source| AssetLoadError::Io {
            path: path.clone(),
            source,
        })?;

    let imported = tokio::task::spawn_blocking(move || import_stl_bytes(&data, &options))
        .await
        .map_err(|e| AssetLoadError::TaskFailed(e.to_string()))??;

    info!(
        "Loaded {}: {} triangles, {} vertices",
        path.display(),
        imported.report.triangles,
        imported.report.welded_vertices
    );
    Ok(imported)
}
