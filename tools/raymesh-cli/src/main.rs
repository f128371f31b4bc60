//! raymesh - mesh and camera tool for the ray tracer viewer
//!
//! Generates spheres, imports STL files and replays camera input without a
//! GPU, printing what the renderer would receive.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use raymesh::{InputEvent, UpAxis};

use raymesh_cli::commands::{self, SphereArgs};
use raymesh_cli::events::parse_event;

#[derive(Parser)]
#[command(name = "raymesh")]
#[command(about = "Mesh preparation and camera tool for the raymesh viewer")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Axis {
    Y,
    Z,
}

impl From<Axis> for UpAxis {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Y => UpAxis::Y,
            Axis::Z => UpAxis::Z,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a UV sphere
    Sphere {
        /// Latitude bands (default: from config)
        #[arg(long)]
        lat: Option<u32>,

        /// Longitude bands (default: from config)
        #[arg(long)]
        lon: Option<u32>,

        /// Up axis (default: from config)
        #[arg(long, value_enum)]
        up: Option<Axis>,

        /// Write the mesh as OBJ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import an STL file (binary or ASCII)
    Import {
        /// Input STL file
        input: PathBuf,

        /// Weld tolerance (default: from config)
        #[arg(long)]
        weld_epsilon: Option<f32>,

        /// Write the imported mesh as OBJ
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay input events through the orbit camera
    Camera {
        /// Events: drag:DX,DY  move:BUTTONS,DX,DY  wheel:DY
        #[arg(value_parser = parse_event, allow_hyphen_values = true)]
        events: Vec<InputEvent>,
    },

    /// Print the effective configuration
    Config {
        /// Save the configuration to this path
        #[arg(long)]
        save: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref())?;
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Sphere {
            lat,
            lon,
            up,
            output,
        } => {
            let args = SphereArgs {
                lat_bands: lat,
                lon_bands: lon,
                up: up.map(UpAxis::from),
            };
            commands::sphere(&config, args, output.as_deref(), &mut out)?;
        }

        Commands::Import {
            input,
            weld_epsilon,
            output,
        } => {
            tracing::info!("Importing {:?}", input);
            commands::import(&config, &input, weld_epsilon, output.as_deref(), &mut out)?;
        }

        Commands::Camera { events } => {
            commands::camera(&config, &events, &mut out)?;
        }

        Commands::Config { save } => {
            commands::config(&config, save.as_deref(), &mut out)?;
        }
    }

    Ok(())
}
