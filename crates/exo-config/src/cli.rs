//! Command-line argument parsing for the exoplanet explorer.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, SceneMode};

/// Exoplanet explorer command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "exoplanets", about = "Explore Kepler exoplanet systems in 3D")]
pub struct CliArgs {
    /// Dataset file path or http(s) URL.
    #[arg(long)]
    pub dataset: Option<String>,

    /// Scene population shape.
    #[arg(long, value_enum)]
    pub mode: Option<SceneMode>,

    /// RNG seed for reproducible scenes.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of stars in multi-star mode.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Viewport width.
    #[arg(long)]
    pub width: Option<u32>,

    /// Viewport height.
    #[arg(long)]
    pub height: Option<u32>,

    /// Number of frames to run before exiting.
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Drive a scripted tour: focus a star, inspect a planet, return.
    #[arg(long)]
    pub autopilot: bool,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(ref source) = args.dataset {
            self.dataset.source = source.clone();
        }
        if let Some(mode) = args.mode {
            self.scene.mode = mode;
        }
        if let Some(seed) = args.seed {
            self.scene.seed = Some(seed);
        }
        if let Some(stars) = args.stars {
            self.scene.star_count = Some(stars);
        }
        if let Some(w) = args.width {
            self.window.width = w;
        }
        if let Some(h) = args.height {
            self.window.height = h;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
