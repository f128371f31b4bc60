//! Subcommand implementations
//!
//! Each command writes its report to `out` so tests can capture it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use raymesh::{
    DemoSession, InputEvent, Mesh, UpAxis, ViewerConfig, generate_sphere, import_stl_file,
    write_obj,
};
use tracing::info;

use crate::headless::HeadlessBoundary;

/// Load the viewer config from `path`, or from the platform config dir
pub fn load_config(path: Option<&Path>) -> Result<ViewerConfig> {
    match path {
        Some(path) => ViewerConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(ViewerConfig::load()),
    }
}

fn write_mesh_obj(mesh: &Mesh, output: &Path) -> Result<()> {
    let file = File::create(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    write_obj(mesh, BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote {}", output.display());
    Ok(())
}

/// Sphere overrides from the command line
#[derive(Debug, Default, Clone, Copy)]
pub struct SphereArgs {
    pub lat_bands: Option<u32>,
    pub lon_bands: Option<u32>,
    pub up: Option<UpAxis>,
}

/// Generate a UV sphere and report its size
pub fn sphere(
    config: &ViewerConfig,
    args: SphereArgs,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let lat_bands = args.lat_bands.unwrap_or(config.sphere.lat_bands);
    let lon_bands = args.lon_bands.unwrap_or(config.sphere.lon_bands);
    let up = args.up.unwrap_or(config.up);

    let mesh: Mesh = generate_sphere(lat_bands, lon_bands, up);
    writeln!(out, "vertices: {}", mesh.vertex_count())?;
    writeln!(out, "triangles: {}", mesh.triangle_count())?;

    if let Some(output) = output {
        write_mesh_obj(&mesh, output)?;
    }
    Ok(())
}

/// Import an STL file and report the import statistics
pub fn import(
    config: &ViewerConfig,
    input: &Path,
    weld_epsilon: Option<f32>,
    output: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let mut options = config.import_options();
    if let Some(epsilon) = weld_epsilon {
        options.weld_epsilon = epsilon;
    }

    let imported = import_stl_file(input, &options)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    let report = &imported.report;

    writeln!(out, "input vertices: {}", report.input_vertices)?;
    writeln!(out, "welded vertices: {}", report.welded_vertices)?;
    writeln!(out, "triangles: {}", report.triangles)?;
    writeln!(out, "degenerate normals: {}", report.degenerate_normals.len())?;
    let c = report.transform.center;
    writeln!(out, "center: {} {} {}", c.x, c.y, c.z)?;
    writeln!(out, "scale: {}", report.transform.scale)?;

    if let Some(output) = output {
        write_mesh_obj(&imported.mesh, output)?;
    }
    Ok(())
}

/// Replay input events through a headless session
///
/// Prints the camera position after every event, then the final state.
pub fn camera(config: &ViewerConfig, events: &[InputEvent], out: &mut impl Write) -> Result<()> {
    let mut session = DemoSession::new(config.clone(), HeadlessBoundary::default());

    for event in events {
        session.handle_input(*event);
        let [x, y, z] = session.boundary().camera_position;
        writeln!(out, "{x:.6} {y:.6} {z:.6}")?;
    }

    let camera = session.camera();
    writeln!(
        out,
        "pitch={:.6} yaw={:.6} distance={:.6}",
        camera.pitch(),
        camera.yaw(),
        camera.distance()
    )?;
    Ok(())
}

/// Print the effective config, optionally saving it
pub fn config(config: &ViewerConfig, save: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    write!(out, "{text}")?;
    if let Some(path) = save {
        config
            .save_to(path)
            .with_context(|| format!("Failed to save config {}", path.display()))?;
        info!("Saved config to {}", path.display());
    }
    Ok(())
}
