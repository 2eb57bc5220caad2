//! Configuration for the exoplanet explorer.
//!
//! Settings persist to disk as RON files, accept CLI overrides via clap, and
//! tolerate missing or unknown fields so older config files keep loading.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    Config, DatasetConfig, DebugConfig, InputConfig, NavigationConfig, SceneConfig, SceneMode,
    WindowConfig, default_config_dir,
};
pub use error::ConfigError;
