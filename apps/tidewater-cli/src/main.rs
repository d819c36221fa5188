use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tidewater_common::Viewport;
use tidewater_render::{DebugTextRenderer, PerspectiveCamera, Renderer, WaterScene};
use tidewater_waves::{config, Format, WaveField, WaveSettings};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tidewater-cli", about = "Headless tools for the tidewater water surface")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Wave settings file (.yaml, .yml or .json); defaults are used otherwise
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Yaml => Format::Yaml,
            OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Evaluate elevation and colour at one point of the surface
    Sample {
        #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
        x: f32,
        #[arg(short, long, default_value = "0.0", allow_hyphen_values = true)]
        z: f32,
        /// Seconds since start
        #[arg(short, long, default_value = "0.0")]
        time: f32,
    },
    /// Print a top-down ASCII elevation map
    Heightmap {
        /// Seconds since start
        #[arg(short, long, default_value = "0.0")]
        time: f32,
        #[arg(long, default_value = "64")]
        cols: usize,
        #[arg(long, default_value = "24")]
        rows: usize,
    },
    /// Print the active settings
    Config {
        #[arg(short, long, value_enum, default_value = "yaml")]
        format: OutputFormat,
    },
    /// Validate a settings file
    Check {
        file: PathBuf,
    },
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<WaveSettings> {
    match path {
        Some(path) => {
            tracing::debug!("loading settings from {}", path.display());
            Ok(config::load(path)?)
        }
        None => {
            tracing::debug!("no settings file given, using defaults");
            Ok(WaveSettings::default())
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();

    let settings = load_settings(cli.config.as_deref())?;

    match cli.command {
        Commands::Info => {
            println!("tidewater-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("render: {}", tidewater_render::crate_info());
            println!("tools: {}", tidewater_tools::crate_info());
            let field = WaveField::new(&settings);
            println!("max |elevation|: {:.4}", field.amplitude_bound());
        }
        Commands::Sample { x, z, time } => {
            let sample = WaveField::new(&settings).sample(x, z, time);
            let mix = tidewater_waves::field::mix_strength(&settings, sample.elevation);
            println!("position: ({x:.3}, {z:.3}) t={time:.3}s");
            println!("elevation: {:.6}", sample.elevation);
            println!("mix: {mix:.4}");
            println!(
                "color (linear): ({:.4}, {:.4}, {:.4})",
                sample.color.x, sample.color.y, sample.color.z
            );
        }
        Commands::Heightmap { time, cols, rows } => {
            tracing::debug!("heightmap {cols}x{rows} at t={time}");
            let viewport = Viewport::default();
            let mut scene = WaterScene::new(settings, viewport);
            scene.advance(time);
            let camera = PerspectiveCamera::with_aspect(viewport.aspect());
            print!("{}", DebugTextRenderer::new(cols, rows).render(&scene, &camera));
        }
        Commands::Config { format } => {
            print!("{}", config::to_string(&settings, format.into())?);
        }
        Commands::Check { file } => {
            tracing::debug!("checking {}", file.display());
            let checked = config::load(&file)?;
            let field = WaveField::new(&checked);
            println!(
                "{}: OK (depth={}, surface={}, max |elevation| {:.4})",
                file.display(),
                checked.depth_color(),
                checked.surface_color(),
                field.amplitude_bound()
            );
        }
    }

    Ok(())
}
