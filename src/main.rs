use anyhow::{Context, Result};
use clap::Parser;
use raytracing::{default_scene, Camera, Scene};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "raytracing")]
#[command(about = "Render spheres, planes and triangles with reflections and hard shadows", long_about = None)]
struct Cli {
    /// Image width in pixels
    #[arg(long, default_value_t = 400)]
    width: u32,

    /// Image height in pixels
    #[arg(long, default_value_t = 300)]
    height: u32,

    /// Maximum nearest-hit searches per pixel; overrides the scene file
    #[arg(long)]
    max_depth: Option<u32>,

    /// TOML scene description. Renders the built-in scene when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Output PPM path
    #[arg(short, long, default_value = "output.ppm")]
    output: PathBuf,

    /// Worker threads, defaults to one per logical CPU
    #[arg(short, long)]
    threads: Option<usize>,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let threads = cli.threads.unwrap_or_else(num_cpus::get).max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .context("failed to start the render thread pool")?;

    let mut scene = match &cli.scene {
        Some(path) => Scene::load(path)
            .with_context(|| format!("failed to load scene from {}", path.display()))?,
        None => default_scene(),
    };
    if let Some(max_depth) = cli.max_depth {
        anyhow::ensure!(max_depth >= 1, "--max-depth must be at least 1");
        scene.constants.max_depth = max_depth;
    }
    info!(threads, "scene ready");

    // initialize the camera
    let camera = Camera::new(cli.width, cli.height)?.with_progress(!cli.no_progress);

    // render the image to disk
    camera
        .render_to_disk(&scene, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    Ok(())
}
