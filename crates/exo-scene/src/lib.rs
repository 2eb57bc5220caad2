//! Scene side of the explorer: bodies and their visual resources, the
//! perspective camera, star/planet population, ray picking, and per-frame
//! orbit and rotation animation.

pub mod animation;
pub mod camera;
pub mod graph;
pub mod picking;
pub mod population;
pub mod texture;

pub use animation::{advance_orbits, apply_parallax, rotate_scene};
pub use camera::SceneCamera;
pub use graph::{
    Appearance, Body, BodyId, BodyKind, BodySpec, Orbit, SceneGraph, Visual, VisualPool,
};
pub use picking::{PickHit, Ray, pick, pick_at_pointer, viewport_to_ndc};
pub use population::{
    GenerationOutcome, PopulationParams, Populator, StatusMessage, SystemChoice,
};
pub use texture::{PlanetCategory, TextureKind, TextureSet, planet_category};
