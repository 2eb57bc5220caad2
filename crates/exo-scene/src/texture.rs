//! Texture slots and the temperature-based planet category.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

/// Static image assets the scene draws with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    Universe,
    GenericPlanet,
    HotPlanet,
    ColdPlanet,
    Star,
    Glow,
}

impl TextureKind {
    pub const ALL: [TextureKind; 6] = [
        TextureKind::Universe,
        TextureKind::GenericPlanet,
        TextureKind::HotPlanet,
        TextureKind::ColdPlanet,
        TextureKind::Star,
        TextureKind::Glow,
    ];

    /// File name inside the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            TextureKind::Universe => "universe.jpeg",
            TextureKind::GenericPlanet => "planet.jpg",
            TextureKind::HotPlanet => "hot.jpg",
            TextureKind::ColdPlanet => "cold.jpg",
            TextureKind::Star => "star.jpg",
            TextureKind::Glow => "glow.png",
        }
    }
}

/// Coarse planet class used to choose a surface texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanetCategory {
    Hot,
    Cold,
    Generic,
}

impl PlanetCategory {
    pub fn texture(self) -> TextureKind {
        match self {
            PlanetCategory::Hot => TextureKind::HotPlanet,
            PlanetCategory::Cold => TextureKind::ColdPlanet,
            PlanetCategory::Generic => TextureKind::GenericPlanet,
        }
    }
}

/// Classify by equilibrium temperature: above 500 is hot, below 0 is cold,
/// everything else (including unknown) is generic.
pub fn planet_category(temperature: Option<f64>) -> PlanetCategory {
    match temperature {
        Some(t) if t > 500.0 => PlanetCategory::Hot,
        Some(t) if t < 0.0 => PlanetCategory::Cold,
        _ => PlanetCategory::Generic,
    }
}

/// Resolved texture files. Missing files leave their slot empty; the
/// renderer falls back to flat colors for those.
#[derive(Debug, Clone, Default)]
pub struct TextureSet {
    resolved: HashMap<TextureKind, PathBuf>,
}

impl TextureSet {
    /// Look up every [`TextureKind`] under `asset_dir`.
    pub fn resolve(asset_dir: &Path) -> Self {
        let mut resolved = HashMap::new();
        for kind in TextureKind::ALL {
            let path = asset_dir.join(kind.file_name());
            if path.is_file() {
                resolved.insert(kind, path);
            } else {
                warn!(?kind, path = %path.display(), "texture missing, rendering untextured");
            }
        }
        info!(
            found = resolved.len(),
            total = TextureKind::ALL.len(),
            "resolved textures"
        );
        Self { resolved }
    }

    pub fn path(&self, kind: TextureKind) -> Option<&Path> {
        self.resolved.get(&kind).map(PathBuf::as_path)
    }

    /// Slots with no file behind them.
    pub fn missing(&self) -> Vec<TextureKind> {
        TextureKind::ALL
            .into_iter()
            .filter(|kind| !self.resolved.contains_key(kind))
            .collect()
    }
}
