use anyhow::{Context, Result};
use cherish::{build_scene, init_logging, resolve_display_mode, scene_summary, BUILD_DATE, VERSION};
use cherish_settings::Config;
use clap::Parser;
use std::path::PathBuf;

/// Cherish - sketch in 3D on planar canvases
#[derive(Parser)]
#[command(name = "cherish")]
#[command(about = "3D sketching on canvases placed in space")]
struct Cli {
    /// Config file (.json or .toml); defaults to the platform config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Launch display mode: min, max, full, virtual or detached
    #[arg(short, long)]
    display_mode: Option<String>,

    /// Scene file to open
    scene: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging()?;
    tracing::info!("Cherish {} (built {})", VERSION, BUILD_DATE);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_or_default(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    let mode = match resolve_display_mode(&config, cli.display_mode.as_deref()) {
        Ok(mode) => mode,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("Display mode: {}", mode);

    let mut root = build_scene(&config);
    if let Some(path) = &cli.scene {
        root.open_scene_file(path)
            .with_context(|| format!("opening scene {}", path.display()))?;
    }

    print!("{}", scene_summary(&root));
    Ok(())
}
