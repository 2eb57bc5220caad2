//! One row of the Kepler objects-of-interest catalog.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kepler input catalog identifier of the host star.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StarId(pub u64);

impl fmt::Display for StarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KIC {}", self.0)
    }
}

/// A single exoplanet candidate as it appears in the source JSON.
///
/// Numeric attributes are optional because the catalog has gaps; consumers
/// decide their own fallbacks (see [`planet_radius`](Self::planet_radius)).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExoplanetRecord {
    /// Host star identifier.
    #[serde(alias = "starId")]
    pub kepid: StarId,
    /// KOI designation, e.g. `K00752.01`.
    #[serde(default)]
    pub kepoi_name: Option<String>,
    /// Alternate KOI name.
    #[serde(default)]
    pub koi_name: Option<String>,
    /// Confirmed Kepler name, when the candidate was confirmed.
    #[serde(default)]
    pub kepler_name: Option<String>,
    /// Orbital period in days.
    #[serde(default)]
    pub koi_period: Option<f64>,
    /// Planetary radius in Earth radii.
    #[serde(default)]
    pub koi_prad: Option<f64>,
    /// Equilibrium temperature in Kelvin.
    #[serde(default)]
    pub koi_teq: Option<f64>,
    /// Kepler-band magnitude of the host star.
    #[serde(default)]
    pub koi_kepmag: Option<f64>,
    /// Insolation flux relative to Earth.
    #[serde(default)]
    pub koi_insol: Option<f64>,
    /// Right ascension, sexagesimal string.
    #[serde(default)]
    pub ra_str: Option<String>,
    /// Declination, sexagesimal string.
    #[serde(default)]
    pub dec_str: Option<String>,
}

impl ExoplanetRecord {
    /// Minimal record for a star, all attributes absent.
    pub fn new(kepid: u64) -> Self {
        Self {
            kepid: StarId(kepid),
            kepoi_name: None,
            koi_name: None,
            kepler_name: None,
            koi_period: None,
            koi_prad: None,
            koi_teq: None,
            koi_kepmag: None,
            koi_insol: None,
            ra_str: None,
            dec_str: None,
        }
    }

    /// Visual radius: `koi_prad` when present and positive, otherwise 1.
    pub fn planet_radius(&self) -> f32 {
        match self.koi_prad {
            Some(r) if r > 0.0 && r.is_finite() => r as f32,
            _ => 1.0,
        }
    }

    /// Best display name: Kepler name, then KOI designation, then the star id.
    pub fn display_name(&self) -> String {
        self.kepler_name
            .as_deref()
            .or(self.kepoi_name.as_deref())
            .map(str::to_string)
            .unwrap_or_else(|| self.kepid.to_string())
    }
}
