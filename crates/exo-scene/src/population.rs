//! Turning catalog data into placed stars and planets.
//!
//! Two layouts are supported:
//! - a single system: one star at the origin and one planet per catalog
//!   record of that star, on orbits of radius `10 + 5 * index`;
//! - a star field: many stars scattered in a cube, each tagged with a catalog
//!   record; planets appear only around the focused star.
//!
//! Every populate call despawns all bodies the previous call created before
//! spawning new ones, so the scene never holds bodies from two generations.

use std::f32::consts::TAU;
use std::fmt;

use exo_catalog::{ExoplanetRecord, StarId, StarSystem};
use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, warn};

use crate::graph::{Appearance, BodyId, BodyKind, BodySpec, Orbit, SceneGraph};
use crate::texture::{TextureKind, planet_category};

const SYSTEM_STAR_RADIUS: f32 = 2.0;
const FIELD_STAR_RADIUS: f32 = 0.5;
const FIELD_PLANET_RADIUS: f32 = 0.5;
const FIRST_ORBIT_RADIUS: f32 = 10.0;
const ORBIT_SPACING: f32 = 5.0;
const FOCUS_ORBIT_MIN: f32 = 5.0;
const FOCUS_ORBIT_MAX: f32 = 10.0;
const FOCUS_ELEVATION_MIN: f32 = -2.0;
const FOCUS_ELEVATION_MAX: f32 = 3.0;
const MAX_FIELD_STARS: usize = 500;

/// Tunables for population.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationParams {
    /// Planets spawned around a focused field star.
    pub planets_per_star: usize,
    /// Edge length of the cube field stars are scattered in.
    pub star_field_extent: f32,
    /// Field star count; `None` = one per record, capped.
    pub star_count: Option<usize>,
}

impl Default for PopulationParams {
    fn default() -> Self {
        Self {
            planets_per_star: 5,
            star_field_extent: 200.0,
            star_count: Some(100),
        }
    }
}

/// Which system a single-system population shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemChoice {
    /// Uniformly random among the grouped systems.
    Random,
    /// By position in the grouped list.
    Index(usize),
    /// By host star id.
    Star(StarId),
}

/// Result of a populate call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Bodies were spawned (star plus planets, or the whole star field).
    Populated { bodies: usize },
    /// Nothing to show; the scene is left empty.
    NoSystem,
}

/// Hint shown in the info panel for the current layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusMessage {
    #[default]
    Idle,
    ClickPlanet,
    ClickStar,
    FocusedPlanets,
    NoSystem,
}

impl fmt::Display for StatusMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            StatusMessage::Idle => "",
            StatusMessage::ClickPlanet => "Click an exoplanet to see its details",
            StatusMessage::ClickStar => "Click a star to visit its planets",
            StatusMessage::FocusedPlanets => "Planets around the star! Click a planet!",
            StatusMessage::NoSystem => "No star system available",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layout {
    System,
    StarField,
}

#[derive(Debug, Clone, Copy)]
struct PlacedStar {
    id: BodyId,
    record_index: Option<usize>,
}

/// Sole writer of body placement. Tracks what it spawned so the next
/// generation can dispose of it.
#[derive(Debug)]
pub struct Populator {
    rng: ChaCha8Rng,
    params: PopulationParams,
    layout: Option<Layout>,
    stars: Vec<PlacedStar>,
    planets: Vec<BodyId>,
    focused: Option<BodyId>,
    status: StatusMessage,
}

impl Populator {
    /// `seed = None` draws the seed from the OS.
    pub fn new(params: PopulationParams, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_os_rng(),
        };
        Self {
            rng,
            params,
            layout: None,
            stars: Vec::new(),
            planets: Vec::new(),
            focused: None,
            status: StatusMessage::Idle,
        }
    }

    pub fn params(&self) -> &PopulationParams {
        &self.params
    }

    /// Star bodies of the current generation, in spawn order.
    pub fn stars(&self) -> Vec<BodyId> {
        self.stars.iter().map(|s| s.id).collect()
    }

    /// Planets currently orbiting: the system's planets, or the focused
    /// star's planets in a star field.
    pub fn planets(&self) -> &[BodyId] {
        &self.planets
    }

    /// Star whose generated planets are displayed in a star field.
    pub fn focused_star(&self) -> Option<BodyId> {
        self.focused
    }

    pub fn status(&self) -> StatusMessage {
        self.status
    }

    /// Show one system: a star at the origin and one planet per record.
    pub fn populate_system(
        &mut self,
        scene: &mut SceneGraph,
        systems: &[StarSystem],
        choice: SystemChoice,
    ) -> GenerationOutcome {
        self.clear(scene);

        let selected = match choice {
            SystemChoice::Random if !systems.is_empty() => {
                systems.get(self.rng.random_range(0..systems.len()))
            }
            SystemChoice::Random => None,
            SystemChoice::Index(index) => systems.get(index),
            SystemChoice::Star(star_id) => systems.iter().find(|s| s.star_id == star_id),
        };
        let Some(system) = selected else {
            warn!(?choice, available = systems.len(), "no star system to generate");
            self.status = StatusMessage::NoSystem;
            return GenerationOutcome::NoSystem;
        };

        let star = scene.spawn(BodySpec {
            kind: BodyKind::Star,
            position: Vec3::ZERO,
            radius: SYSTEM_STAR_RADIUS,
            appearance: Appearance {
                texture: TextureKind::Star,
                color: [1.0, 1.0, 0.0],
                emissive: false,
                glow: None,
            },
            record: system.records.first().cloned(),
            orbit: None,
        });
        self.stars.push(PlacedStar {
            id: star,
            record_index: None,
        });

        for (index, record) in system.records.iter().enumerate() {
            let orbit = Orbit {
                center: star,
                angle: self.rng.random_range(0.0..TAU),
                distance: FIRST_ORBIT_RADIUS + ORBIT_SPACING * index as f32,
                elevation: 0.0,
            };
            let spec = planet_spec(Some(record), record.planet_radius(), orbit, Vec3::ZERO);
            let planet = scene.spawn(spec);
            self.planets.push(planet);
        }

        self.layout = Some(Layout::System);
        self.status = StatusMessage::ClickPlanet;
        info!(
            star = %system.star_id,
            planets = self.planets.len(),
            "generated star system"
        );
        GenerationOutcome::Populated {
            bodies: 1 + self.planets.len(),
        }
    }

    /// Scatter field stars uniformly in a cube centred on the origin. Star
    /// `i` carries record `i % records.len()`.
    pub fn populate_star_field(
        &mut self,
        scene: &mut SceneGraph,
        records: &[ExoplanetRecord],
    ) -> GenerationOutcome {
        self.clear(scene);

        if records.is_empty() {
            warn!("catalog is empty, no star field generated");
            self.status = StatusMessage::NoSystem;
            return GenerationOutcome::NoSystem;
        }

        let count = self
            .params
            .star_count
            .unwrap_or_else(|| records.len().min(MAX_FIELD_STARS));
        let extent = self.params.star_field_extent;

        for i in 0..count {
            let position = Vec3::new(
                (self.rng.random::<f32>() - 0.5) * extent,
                (self.rng.random::<f32>() - 0.5) * extent,
                (self.rng.random::<f32>() - 0.5) * extent,
            );
            let record_index = i % records.len();
            let id = scene.spawn(BodySpec {
                kind: BodyKind::Star,
                position,
                radius: FIELD_STAR_RADIUS,
                appearance: Appearance {
                    texture: TextureKind::Star,
                    color: [1.0, 1.0, 1.0],
                    emissive: true,
                    glow: Some(TextureKind::Glow),
                },
                record: Some(records[record_index].clone()),
                orbit: None,
            });
            self.stars.push(PlacedStar {
                id,
                record_index: Some(record_index),
            });
        }

        self.layout = Some(Layout::StarField);
        self.status = StatusMessage::ClickStar;
        info!(stars = count, "generated star field");
        GenerationOutcome::Populated { bodies: count }
    }

    /// Spawn `planets_per_star` planets around a field star, replacing any
    /// planets shown before. Planet `i` starts at angle `i` radians on a
    /// random orbit in `[5, 10)`, lifted off the plane by a random constant
    /// elevation, and carries record `(star_record + i) % records.len()`.
    pub fn populate_planets_around(
        &mut self,
        scene: &mut SceneGraph,
        star: BodyId,
        records: &[ExoplanetRecord],
    ) -> usize {
        self.clear_planets(scene);

        let Some(star_position) = scene.get(star).map(|body| body.position()) else {
            warn!(?star, "cannot generate planets around a star that is gone");
            return 0;
        };
        let base = self
            .stars
            .iter()
            .find(|s| s.id == star)
            .and_then(|s| s.record_index)
            .unwrap_or(0);

        for i in 0..self.params.planets_per_star {
            let orbit = Orbit {
                center: star,
                angle: i as f32,
                distance: self.rng.random_range(FOCUS_ORBIT_MIN..FOCUS_ORBIT_MAX),
                elevation: self
                    .rng
                    .random_range(FOCUS_ELEVATION_MIN..FOCUS_ELEVATION_MAX),
            };
            let record = match records.len() {
                0 => None,
                len => records.get((base + i) % len),
            };
            let spec = planet_spec(record, FIELD_PLANET_RADIUS, orbit, star_position);
            self.planets.push(scene.spawn(spec));
        }

        self.focused = Some(star);
        self.status = StatusMessage::FocusedPlanets;
        debug!(?star, planets = self.planets.len(), "generated planets around star");
        self.planets.len()
    }

    /// Despawn the displayed planets. Returns how many were removed.
    pub fn clear_planets(&mut self, scene: &mut SceneGraph) -> usize {
        let removed = self
            .planets
            .drain(..)
            .filter(|&id| scene.despawn(id))
            .count();
        self.focused = None;
        if self.layout == Some(Layout::StarField) {
            self.status = StatusMessage::ClickStar;
        }
        removed
    }

    /// Despawn everything this populator created. Returns how many bodies
    /// were removed.
    pub fn clear(&mut self, scene: &mut SceneGraph) -> usize {
        let mut removed = self.clear_planets(scene);
        removed += self
            .stars
            .drain(..)
            .filter(|star| scene.despawn(star.id))
            .count();
        self.layout = None;
        self.status = StatusMessage::Idle;
        if removed > 0 {
            debug!(removed, "disposed previous generation");
        }
        removed
    }
}

fn planet_spec(
    record: Option<&ExoplanetRecord>,
    radius: f32,
    orbit: Orbit,
    center: Vec3,
) -> BodySpec {
    BodySpec {
        kind: BodyKind::Planet,
        position: center + orbit.offset(),
        radius,
        appearance: Appearance {
            texture: planet_category(record.and_then(|r| r.koi_teq)).texture(),
            color: [1.0, 1.0, 1.0],
            emissive: false,
            glow: None,
        },
        record: record.cloned(),
        orbit: Some(orbit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use exo_catalog::group_by_star;

    fn record(kepid: u64, teq: f64) -> ExoplanetRecord {
        ExoplanetRecord {
            koi_teq: Some(teq),
            koi_prad: Some(1.5),
            ..ExoplanetRecord::new(kepid)
        }
    }

    fn sample() -> Vec<ExoplanetRecord> {
        vec![record(1, 600.0), record(1, -10.0), record(2, 50.0)]
    }

    #[test]
    fn test_single_system_places_planets_on_spaced_orbits() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(1));
        let systems = group_by_star(&sample());

        let outcome =
            populator.populate_system(&mut scene, &systems, SystemChoice::Star(StarId(1)));
        assert_eq!(outcome, GenerationOutcome::Populated { bodies: 3 });

        let star = populator.stars()[0];
        assert_eq!(scene.get(star).unwrap().position(), Vec3::ZERO);

        let distances: Vec<f32> = populator
            .planets()
            .iter()
            .map(|&id| scene.get(id).unwrap().position().length())
            .collect();
        assert_eq!(distances.len(), 2);
        assert!((distances[0] - 10.0).abs() < 1e-4);
        assert!((distances[1] - 15.0).abs() < 1e-4);
    }

    #[test]
    fn test_planet_textures_follow_temperature() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(1));
        let systems = group_by_star(&sample());
        populator.populate_system(&mut scene, &systems, SystemChoice::Index(0));

        let textures: Vec<_> = populator
            .planets()
            .iter()
            .map(|&id| scene.get(id).unwrap().appearance.texture)
            .collect();
        assert_eq!(textures, [TextureKind::HotPlanet, TextureKind::ColdPlanet]);
    }

    #[test]
    fn test_planet_radius_from_record_with_fallback() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(1));
        let systems = group_by_star(&[ExoplanetRecord::new(9), record(9, 10.0)]);
        populator.populate_system(&mut scene, &systems, SystemChoice::Index(0));
        let radii: Vec<f32> = populator
            .planets()
            .iter()
            .map(|&id| scene.get(id).unwrap().radius)
            .collect();
        assert_eq!(radii, [1.0, 1.5]);
    }

    #[test]
    fn test_initial_angles_within_full_turn() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(5));
        let records: Vec<_> = (0..20).map(|_| record(4, 100.0)).collect();
        populator.populate_system(&mut scene, &group_by_star(&records), SystemChoice::Random);
        for &id in populator.planets() {
            let angle = scene.get(id).unwrap().orbit.unwrap().angle;
            assert!((0.0..TAU).contains(&angle));
        }
    }

    #[test]
    fn test_empty_catalog_declines() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(1));
        assert_eq!(
            populator.populate_system(&mut scene, &[], SystemChoice::Random),
            GenerationOutcome::NoSystem
        );
        assert_eq!(
            populator.populate_star_field(&mut scene, &[]),
            GenerationOutcome::NoSystem
        );
        assert!(scene.is_empty());
        assert_eq!(populator.status(), StatusMessage::NoSystem);
    }

    #[test]
    fn test_out_of_range_index_declines_and_clears() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(1));
        let systems = group_by_star(&sample());
        populator.populate_system(&mut scene, &systems, SystemChoice::Index(0));
        let outcome = populator.populate_system(&mut scene, &systems, SystemChoice::Index(9));
        assert_eq!(outcome, GenerationOutcome::NoSystem);
        assert!(scene.is_empty());
        assert_eq!(scene.live_visuals(), 0);
    }

    #[test]
    fn test_regeneration_leaves_only_new_bodies() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(3));
        let records: Vec<_> = (0..40).map(|i| record(i % 7, 20.0)).collect();
        let systems = group_by_star(&records);

        for _ in 0..25 {
            let GenerationOutcome::Populated { bodies } =
                populator.populate_system(&mut scene, &systems, SystemChoice::Random)
            else {
                panic!("expected a system");
            };
            assert_eq!(scene.len(), bodies);
            assert_eq!(scene.live_visuals(), bodies);
        }
    }

    #[test]
    fn test_star_field_scattered_inside_cube() {
        let mut scene = SceneGraph::new();
        let params = PopulationParams {
            star_count: Some(100),
            ..PopulationParams::default()
        };
        let mut populator = Populator::new(params, Some(11));
        let records = sample();
        let outcome = populator.populate_star_field(&mut scene, &records);
        assert_eq!(outcome, GenerationOutcome::Populated { bodies: 100 });
        assert_eq!(populator.status(), StatusMessage::ClickStar);

        for (index, id) in populator.stars().into_iter().enumerate() {
            let body = scene.get(id).unwrap();
            assert!(body.position().abs().max_element() <= 100.0);
            assert_eq!(body.record.as_ref(), Some(&records[index % 3]));
        }
    }

    #[test]
    fn test_star_count_defaults_to_catalog_size() {
        let mut scene = SceneGraph::new();
        let params = PopulationParams {
            star_count: None,
            ..PopulationParams::default()
        };
        let mut populator = Populator::new(params, Some(11));
        populator.populate_star_field(&mut scene, &sample());
        assert_eq!(populator.stars().len(), 3);
    }

    #[test]
    fn test_focused_star_gets_five_planets() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(2));
        let records = sample();
        populator.populate_star_field(&mut scene, &records);
        let star = populator.stars()[4];
        let star_position = scene.get(star).unwrap().position();

        let created = populator.populate_planets_around(&mut scene, star, &records);
        assert_eq!(created, 5);
        assert_eq!(populator.focused_star(), Some(star));
        assert_eq!(populator.status(), StatusMessage::FocusedPlanets);

        for &id in populator.planets() {
            let body = scene.get(id).unwrap();
            let orbit = body.orbit.unwrap();
            assert_eq!(orbit.center, star);
            assert!((FOCUS_ORBIT_MIN..FOCUS_ORBIT_MAX).contains(&orbit.distance));
            assert!((FOCUS_ELEVATION_MIN..FOCUS_ELEVATION_MAX).contains(&orbit.elevation));
            let offset = body.position() - star_position;
            let planar = glam::Vec2::new(offset.x, offset.z).length();
            assert!((planar - orbit.distance).abs() < 1e-3);
        }
    }

    #[test]
    fn test_planet_records_wrap_modulo_catalog() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(2));
        let records = sample();
        populator.populate_star_field(&mut scene, &records);
        // Star 2 carries record 2, so its planets take records 2, 0, 1, 2, 0.
        let star = populator.stars()[2];
        populator.populate_planets_around(&mut scene, star, &records);
        let kepids: Vec<u64> = populator
            .planets()
            .iter()
            .map(|&id| scene.get(id).unwrap().record.as_ref().unwrap().kepid.0)
            .collect();
        assert_eq!(kepids, [2, 1, 1, 2, 1]);
    }

    #[test]
    fn test_refocus_replaces_previous_planets() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(2));
        let records = sample();
        populator.populate_star_field(&mut scene, &records);
        let stars = populator.stars();

        populator.populate_planets_around(&mut scene, stars[0], &records);
        let first_planets = populator.planets().to_vec();
        populator.populate_planets_around(&mut scene, stars[1], &records);

        assert!(first_planets.iter().all(|&id| !scene.contains(id)));
        assert_eq!(scene.len(), 100 + 5);
        assert_eq!(scene.live_visuals(), 100 + 5);
    }

    #[test]
    fn test_clear_planets_restores_star_hint() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(2));
        let records = sample();
        populator.populate_star_field(&mut scene, &records);
        let star = populator.stars()[0];
        populator.populate_planets_around(&mut scene, star, &records);
        assert_eq!(populator.clear_planets(&mut scene), 5);
        assert_eq!(populator.status(), StatusMessage::ClickStar);
        assert!(populator.focused_star().is_none());
        assert_eq!(scene.len(), 100);
    }

    #[test]
    fn test_switching_layouts_disposes_everything() {
        let mut scene = SceneGraph::new();
        let mut populator = Populator::new(PopulationParams::default(), Some(2));
        let records = sample();
        populator.populate_star_field(&mut scene, &records);
        let star = populator.stars()[0];
        populator.populate_planets_around(&mut scene, star, &records);

        populator.populate_system(&mut scene, &group_by_star(&records), SystemChoice::Index(1));
        assert_eq!(scene.len(), 2);
        assert_eq!(scene.live_visuals(), 2);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let records = sample();
        let place = |seed| {
            let mut scene = SceneGraph::new();
            let mut populator = Populator::new(PopulationParams::default(), Some(seed));
            populator.populate_star_field(&mut scene, &records);
            populator
                .stars()
                .iter()
                .map(|&id| scene.get(id).unwrap().position())
                .collect::<Vec<_>>()
        };
        assert_eq!(place(8), place(8));
        assert_ne!(place(8), place(9));
    }
}
