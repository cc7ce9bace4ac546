//! brickplay entry point
//!
//! Parses the command line, loads settings and runs the chosen demo.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use winit::dpi::LogicalSize;

use brickplay::{Settings, SettingsOrigin};
use brickplay::apps::{BreakoutApp, ShaderplayApp};
use brickplay::audio::AudioManager;
use brickplay::host::{self, GpuInit, RuntimeConfig};

/// Default settings file, looked up in the working directory
const SETTINGS_FILE: &str = "brickplay.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AppKind {
    /// Bat, ball and a wall of blocks
    Breakout,
    /// Animated shader playground
    Shaderplay,
}

#[derive(Parser, Debug)]
#[command(name = "brickplay", version, about = "Breakout and shader playground demos")]
struct Cli {
    /// Demo to run
    #[arg(value_enum, default_value_t = AppKind::Breakout)]
    app: AppKind,

    /// Settings file (JSON); defaults to ./brickplay.json if present
    #[arg(short, long)]
    settings: Option<PathBuf>,

    /// Seed for the serve direction, overrides the settings file
    #[arg(long)]
    seed: Option<u64>,
}

/// Settings for this run with command-line overrides applied.
///
/// Nothing is logged here; the logger starts from the result.
fn load_settings(cli: &Cli) -> Result<(Settings, SettingsOrigin)> {
    let (mut settings, origin) = match &cli.settings {
        Some(path) => (
            Settings::load_from(path)?,
            SettingsOrigin::File(path.clone()),
        ),
        None => Settings::load_or_default(Path::new(SETTINGS_FILE))?,
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    Ok((settings, origin))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (settings, origin) = load_settings(&cli)?;
    host::init_logging(settings.log_filter.as_deref());
    log::info!("{origin}");
    log::info!("Starting {:?}", cli.app);

    let config = RuntimeConfig {
        title: "brickplay".to_string(),
        initial_size: LogicalSize::new(
            settings.window.width as f64,
            settings.window.height as f64,
        ),
        gpu: GpuInit::default().with_vsync(settings.window.vsync),
    };

    let result = match cli.app {
        AppKind::Breakout => {
            let mut audio = AudioManager::default();
            audio.set_master_volume(settings.master_volume);
            audio.set_muted(settings.muted);
            let app = BreakoutApp::new(settings.effective_seed(), audio);
            host::run(config, app)
        }
        AppKind::Shaderplay => host::run(config, ShaderplayApp::new()),
    };
    result.context("demo exited with an error")
}
