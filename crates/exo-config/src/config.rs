//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "exoplanets";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Viewport settings.
    pub window: WindowConfig,
    /// Where the exoplanet catalog comes from.
    pub dataset: DatasetConfig,
    /// Scene population settings.
    pub scene: SceneConfig,
    /// Camera and animation constants.
    pub navigation: NavigationConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Viewport configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Viewport width in logical pixels.
    pub width: u32,
    /// Viewport height in logical pixels.
    pub height: u32,
    /// Window title.
    pub title: String,
    /// Frame rate the headless loop paces itself to (0 = unpaced).
    pub target_fps: u32,
}

/// Dataset location.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatasetConfig {
    /// File path or `http(s)://` URL of the JSON record array.
    pub source: String,
}

/// Which population shape the scene uses.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum,
)]
pub enum SceneMode {
    /// One star at the origin with one planet per catalog record of that star.
    #[default]
    SingleSystem,
    /// Many scattered stars; planets appear once a star is focused.
    MultiStar,
}

/// Scene population configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Population shape.
    pub mode: SceneMode,
    /// Number of stars in multi-star mode (`None` = one per catalog record, capped).
    pub star_count: Option<u32>,
    /// Edge length of the cube stars are scattered in.
    pub star_field_extent: f32,
    /// Planets generated around a focused star in multi-star mode.
    pub planets_per_star: u32,
    /// RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Directory holding texture images.
    pub asset_dir: PathBuf,
    /// Radius of the inside-out universe background sphere.
    pub universe_radius: f32,
}

/// Camera and animation constants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Overview camera position.
    pub initial_camera: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Near clip distance.
    pub near: f32,
    /// Far clip distance.
    pub far: f32,
    /// Distance kept between the camera and a focused star.
    pub safe_distance: f32,
    /// Progress added per frame during a camera transition.
    pub transition_step: f32,
    /// Orbital angle added per frame, in radians.
    pub orbit_step: f32,
    /// Scene yaw added per frame while rotation is enabled, in radians.
    pub rotation_step: f32,
    /// How strongly the background follows the pointer.
    pub parallax_strength: f32,
    /// Free-orbit damping factor.
    pub damping: f32,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Mouse drag sensitivity for the free-orbit controls.
    pub orbit_sensitivity: f32,
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every navigation effect at debug level.
    pub trace_navigation: bool,
}

// --- Default implementations ---

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Exoplanet Explorer".to_string(),
            target_fps: 60,
        }
    }
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            source: "assets/data.json".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            mode: SceneMode::SingleSystem,
            star_count: Some(100),
            star_field_extent: 200.0,
            planets_per_star: 5,
            seed: None,
            asset_dir: PathBuf::from("assets/images"),
            universe_radius: 900.0,
        }
    }
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_camera: [0.0, 0.0, 50.0],
            fov_y_degrees: 75.0,
            near: 0.1,
            far: 1000.0,
            safe_distance: 5.0,
            transition_step: 0.02,
            orbit_step: 0.005,
            rotation_step: 0.001,
            parallax_strength: 0.05,
            damping: 0.05,
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            orbit_sensitivity: 0.005,
            keybindings: HashMap::new(),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_navigation: false,
        }
    }
}

/// Platform config directory for the app, e.g. `~/.config/exoplanets/config`.
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join(APP_NAME).join("config"))
}

const CONFIG_FILE: &str = "config.ron";

impl Config {
    /// Read `config.ron` from `config_dir`, writing the defaults there first
    /// when it does not exist yet.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        if !path.exists() {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Wrote default config to {}", path.display());
            return Ok(config);
        }
        let config = read_config(&path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE);
        let write_err = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };
        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let text = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;
        std::fs::write(&path, text).map_err(write_err)
    }

    /// Re-read the file; `Some` only when it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let fresh = read_config(&config_dir.join(CONFIG_FILE))?;
        if fresh == *self {
            return Ok(None);
        }
        log::info!("Config changed on disk");
        Ok(Some(fresh))
    }
}

fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&text).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
