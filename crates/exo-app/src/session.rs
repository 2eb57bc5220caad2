//! The explorer session: one context object owning the catalog, the scene,
//! the camera and the navigation state. Hosts feed it [`SessionEvent`]s and
//! call [`Session::tick`] once per frame.

use std::fmt;
use std::path::PathBuf;

use exo_catalog::{
    CatalogError, DatasetSource, ExoplanetRecord, PlanetInfo, StarSystem, group_by_star,
    load_dataset,
};
use exo_config::{Config, SceneMode};
use exo_nav::{
    CameraView, FocusTarget, NavEffect, NavEvent, NavMode, NavigationParams, NavigationState,
    OrbitControls,
};
use exo_scene::{
    BodyId, BodyKind, GenerationOutcome, PopulationParams, Populator, SceneCamera, SceneGraph,
    StatusMessage, SystemChoice, TextureSet, advance_orbits, apply_parallax, pick_at_pointer,
    rotate_scene, viewport_to_ndc,
};
use glam::{Vec2, Vec3};
use tracing::{debug, info};

/// Everything a session needs from the configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub mode: SceneMode,
    pub population: PopulationParams,
    pub seed: Option<u64>,
    pub navigation: NavigationParams,
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: Vec2,
    pub orbit_step: f32,
    pub rotation_step: f32,
    pub parallax_strength: f32,
    pub damping: f32,
    pub orbit_sensitivity: f32,
    pub asset_dir: PathBuf,
    pub universe_radius: f32,
    pub trace_navigation: bool,
}

impl SessionSettings {
    pub fn from_config(config: &Config) -> Self {
        let nav = &config.navigation;
        Self {
            mode: config.scene.mode,
            population: PopulationParams {
                planets_per_star: config.scene.planets_per_star as usize,
                star_field_extent: config.scene.star_field_extent,
                star_count: config.scene.star_count.map(|count| count as usize),
            },
            seed: config.scene.seed,
            navigation: NavigationParams {
                home: Vec3::from_array(nav.initial_camera),
                safe_distance: nav.safe_distance,
                transition_step: nav.transition_step,
            },
            fov_y: nav.fov_y_degrees.to_radians(),
            near: nav.near,
            far: nav.far,
            viewport: Vec2::new(config.window.width as f32, config.window.height as f32),
            orbit_step: nav.orbit_step,
            rotation_step: nav.rotation_step,
            parallax_strength: nav.parallax_strength,
            damping: nav.damping,
            orbit_sensitivity: config.input.orbit_sensitivity,
            asset_dir: config.scene.asset_dir.clone(),
            universe_radius: config.scene.universe_radius,
            trace_navigation: config.debug.trace_navigation,
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Discrete user input, already translated from device events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// Click at a viewport position (pixels, origin top-left).
    Select { pointer: Vec2 },
    PointerMoved { pointer: Vec2 },
    Cancel,
    GenerateSystem,
    ToggleRotation,
    Resize { width: u32, height: u32 },
    /// Free-orbit drag in pixels.
    Orbit { delta: Vec2 },
    /// Free-orbit zoom in wheel lines.
    Zoom { amount: f32 },
}

/// Coarse navigation phase for display and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    Overview,
    Transitioning,
    Focused,
}

impl fmt::Display for NavPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NavPhase::Overview => "overview",
            NavPhase::Transitioning => "transitioning",
            NavPhase::Focused => "focused",
        })
    }
}

/// What the renderer needs after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSummary {
    pub frame: u64,
    pub phase: NavPhase,
    pub progress: Option<f32>,
    pub camera_position: Vec3,
    pub camera_forward: Vec3,
    pub bodies: usize,
    pub live_visuals: usize,
    pub scene_yaw: f32,
    pub background_tilt: Vec2,
    pub rotation_enabled: bool,
    pub orbit_controls_enabled: bool,
}

pub struct Session {
    settings: SessionSettings,
    records: Vec<ExoplanetRecord>,
    systems: Vec<StarSystem>,
    scene: SceneGraph,
    camera: SceneCamera,
    textures: TextureSet,
    populator: Populator,
    nav: NavigationState,
    orbit_controls: OrbitControls,
    rotation_enabled: bool,
    viewport: Vec2,
    selected: Option<BodyId>,
    info: Option<PlanetInfo>,
    frame: u64,
}

impl Session {
    /// Fetch the catalog and build a session. A failed fetch or parse leaves
    /// no session at all.
    pub fn load(settings: SessionSettings, source: &DatasetSource) -> Result<Self, CatalogError> {
        let records = load_dataset(source)?;
        Ok(Self::new(settings, records))
    }

    /// Build a session over already-loaded records and generate the first
    /// scene.
    pub fn new(settings: SessionSettings, records: Vec<ExoplanetRecord>) -> Self {
        let systems = group_by_star(&records);
        info!(
            records = records.len(),
            systems = systems.len(),
            mode = ?settings.mode,
            "starting session"
        );

        let viewport = settings.viewport;
        let camera = SceneCamera::new(
            settings.navigation.home,
            settings.fov_y,
            aspect(viewport),
            settings.near,
            settings.far,
        );
        // Free orbit stays inside the background sphere.
        let mut orbit_controls = OrbitControls::new(settings.damping, settings.orbit_sensitivity);
        orbit_controls.distance_max = settings.universe_radius.max(orbit_controls.distance_min);
        let mut session = Self {
            textures: TextureSet::resolve(&settings.asset_dir),
            populator: Populator::new(settings.population.clone(), settings.seed),
            nav: NavigationState::new(settings.navigation),
            orbit_controls,
            scene: SceneGraph::new(),
            camera,
            records,
            systems,
            rotation_enabled: false,
            viewport,
            selected: None,
            info: None,
            frame: 0,
            settings,
        };
        session.generate(SystemChoice::Random);
        session
    }

    pub fn handle(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Select { pointer } => self.select(pointer),
            SessionEvent::PointerMoved { pointer } => {
                if self.nav.is_overview() {
                    let ndc = viewport_to_ndc(pointer, self.viewport);
                    apply_parallax(&mut self.scene, ndc, self.settings.parallax_strength);
                }
            }
            SessionEvent::Cancel => self.navigate(NavEvent::Cancel),
            SessionEvent::GenerateSystem => {
                self.generate(SystemChoice::Random);
            }
            SessionEvent::ToggleRotation => {
                self.rotation_enabled = !self.rotation_enabled;
                info!(enabled = self.rotation_enabled, "scene rotation toggled");
            }
            SessionEvent::Resize { width, height } => {
                if width > 0 && height > 0 {
                    self.viewport = Vec2::new(width as f32, height as f32);
                    self.camera.set_aspect_ratio(self.viewport.x, self.viewport.y);
                }
            }
            SessionEvent::Orbit { delta } => self.orbit_controls.rotate(delta),
            SessionEvent::Zoom { amount } => self.orbit_controls.zoom(amount),
        }
    }

    /// Advance one frame: orbits, scene rotation, camera transition, then
    /// free-orbit controls.
    pub fn tick(&mut self) -> FrameSummary {
        advance_orbits(
            &mut self.scene,
            self.populator.planets(),
            self.settings.orbit_step,
        );
        if self.rotation_enabled && self.nav.is_overview() {
            rotate_scene(&mut self.scene, self.settings.rotation_step);
        }
        self.navigate(NavEvent::Frame);
        self.orbit_controls.update(&mut self.camera);

        self.frame += 1;
        self.summary()
    }

    /// Replace the scene with a new generation. Any focus is dropped and the
    /// camera returns home.
    pub fn generate(&mut self, choice: SystemChoice) -> GenerationOutcome {
        self.nav = NavigationState::new(self.settings.navigation);
        self.orbit_controls.disable();
        self.camera.position = self.settings.navigation.home;
        self.camera.look_at(Vec3::ZERO);
        self.selected = None;
        self.info = None;

        match self.settings.mode {
            SceneMode::SingleSystem => {
                self.populator
                    .populate_system(&mut self.scene, &self.systems, choice)
            }
            SceneMode::MultiStar => self
                .populator
                .populate_star_field(&mut self.scene, &self.records),
        }
    }

    /// Bodies a click may hit right now: the displayed system's planets, or
    /// in a star field either every star or the focused star's planets.
    pub fn candidates(&self) -> Vec<BodyId> {
        match self.settings.mode {
            SceneMode::SingleSystem => self.populator.planets().to_vec(),
            SceneMode::MultiStar if self.nav.focused().is_some() => {
                self.populator.planets().to_vec()
            }
            SceneMode::MultiStar => self.populator.stars(),
        }
    }

    fn select(&mut self, pointer: Vec2) {
        // The fly-in owns the selection until it lands.
        if self.nav.is_transitioning() {
            debug!(?pointer, "click ignored mid-transition");
            return;
        }
        let candidates = self.candidates();
        let Some(hit) = pick_at_pointer(
            &self.scene,
            &self.camera,
            pointer,
            self.viewport,
            &candidates,
        ) else {
            debug!(?pointer, "click hit nothing");
            return;
        };
        let Some(body) = self.scene.get(hit.body) else {
            return;
        };

        if let Some(record) = &body.record {
            let info = PlanetInfo::from_record(record);
            info!(body = ?hit.body, name = %record.display_name(), "selected");
            self.info = Some(info);
            self.selected = Some(hit.body);
        }

        if body.kind == BodyKind::Star {
            let Some(position) = self.scene.world_position(hit.body) else {
                return;
            };
            self.navigate(NavEvent::Pick(FocusTarget {
                body: hit.body,
                position,
            }));
        }
    }

    fn navigate(&mut self, event: NavEvent) {
        let view = CameraView {
            position: self.camera.position,
        };
        let effects = self.nav.handle(event, &view);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: NavEffect) {
        if self.settings.trace_navigation {
            debug!(?effect, "navigation effect");
        }
        match effect {
            NavEffect::MoveCamera { position, look_at } => {
                self.camera.position = position;
                self.camera.look_at(look_at);
            }
            NavEffect::EnableOrbitControls { target } => {
                self.orbit_controls.enable(target, self.camera.position);
            }
            NavEffect::DisableOrbitControls => self.orbit_controls.disable(),
            NavEffect::PopulatePlanets(star) => {
                self.populator
                    .populate_planets_around(&mut self.scene, star, &self.records);
            }
            NavEffect::ClearPlanets => {
                self.populator.clear_planets(&mut self.scene);
                if self.selected.is_some_and(|id| !self.scene.contains(id)) {
                    self.selected = None;
                    self.info = None;
                }
            }
        }
    }

    /// Viewport pixel position of a body's center, if it is on screen.
    pub fn screen_position(&self, body: BodyId) -> Option<Vec2> {
        let world = self.scene.world_position(body)?;
        let ndc = self.camera.world_to_ndc(world)?;
        if ndc.abs().max_element() > 1.0 {
            return None;
        }
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }

    pub fn summary(&self) -> FrameSummary {
        let phase = match self.nav.mode() {
            NavMode::Overview => NavPhase::Overview,
            NavMode::Transitioning(_) => NavPhase::Transitioning,
            NavMode::FocusedOnStar(_) => NavPhase::Focused,
        };
        FrameSummary {
            frame: self.frame,
            phase,
            progress: self.nav.progress(),
            camera_position: self.camera.position,
            camera_forward: self.camera.forward(),
            bodies: self.scene.len(),
            live_visuals: self.scene.live_visuals(),
            scene_yaw: self.scene.yaw(),
            background_tilt: self.scene.background_tilt(),
            rotation_enabled: self.rotation_enabled,
            orbit_controls_enabled: self.orbit_controls.is_enabled(),
        }
    }

    /// Info panel contents: the selection's rows, or the current hint.
    pub fn panel_text(&self) -> String {
        match &self.info {
            Some(info) => info.to_string(),
            None => self.status().to_string(),
        }
    }

    pub fn status(&self) -> StatusMessage {
        self.populator.status()
    }

    pub fn info(&self) -> Option<&PlanetInfo> {
        self.info.as_ref()
    }

    pub fn selected(&self) -> Option<BodyId> {
        self.selected
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.nav
    }

    pub fn orbit_controls(&self) -> &OrbitControls {
        &self.orbit_controls
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn camera(&self) -> &SceneCamera {
        &self.camera
    }

    pub fn textures(&self) -> &TextureSet {
        &self.textures
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn stars(&self) -> Vec<BodyId> {
        self.populator.stars()
    }

    pub fn planets(&self) -> &[BodyId] {
        self.populator.planets()
    }

    pub fn mode(&self) -> SceneMode {
        self.settings.mode
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn rotation_enabled(&self) -> bool {
        self.rotation_enabled
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }
}

fn aspect(viewport: Vec2) -> f32 {
    if viewport.x > 0.0 && viewport.y > 0.0 {
        viewport.x / viewport.y
    } else {
        16.0 / 9.0
    }
}
