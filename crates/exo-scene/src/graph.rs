//! Scene graph: generational body handles plus the visual resources each
//! body holds.
//!
//! Every spawned body owns one geometry and one material from the
//! [`VisualPool`]. Despawning releases both, so a leak shows up as
//! `live_visuals() > len()`.

use std::collections::HashSet;

use exo_catalog::ExoplanetRecord;
use glam::{Quat, Vec2, Vec3};

use crate::texture::TextureKind;

/// Handle to a body in a [`SceneGraph`]. Stale handles never alias a newer
/// body because the slot generation is bumped on despawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyId {
    index: u32,
    generation: u32,
}

impl BodyId {
    /// Slot index, stable for the lifetime of the body.
    pub fn index(&self) -> u32 {
        self.index
    }
}

/// What a body represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Star,
    Planet,
}

/// Circular orbit around another body. Angle and distance are the derived
/// planet metadata; `elevation` is the constant offset off the orbital plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orbit {
    pub center: BodyId,
    pub angle: f32,
    pub distance: f32,
    pub elevation: f32,
}

impl Orbit {
    /// Offset from the orbit center for the current angle. The orbital plane
    /// is XZ; Y carries the elevation.
    pub fn offset(&self) -> Vec3 {
        Vec3::new(
            self.angle.cos() * self.distance,
            self.elevation,
            self.angle.sin() * self.distance,
        )
    }
}

/// How a body is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    pub texture: TextureKind,
    pub color: [f32; 3],
    pub emissive: bool,
    /// Billboard glow drawn around the body, if any.
    pub glow: Option<TextureKind>,
}

/// Geometry and material handles owned by one body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visual {
    pub geometry: u64,
    pub material: u64,
}

/// Allocator for render-side resources. The external renderer maps these
/// handles to GPU objects; the pool only tracks which are alive.
#[derive(Debug, Default)]
pub struct VisualPool {
    next_id: u64,
    geometries: HashSet<u64>,
    materials: HashSet<u64>,
}

impl VisualPool {
    /// Allocate a geometry/material pair.
    pub fn allocate(&mut self) -> Visual {
        let geometry = self.next_id;
        let material = self.next_id + 1;
        self.next_id += 2;
        self.geometries.insert(geometry);
        self.materials.insert(material);
        Visual { geometry, material }
    }

    /// Release a pair. Returns `false` if either half was already released.
    pub fn release(&mut self, visual: Visual) -> bool {
        let geometry = self.geometries.remove(&visual.geometry);
        let material = self.materials.remove(&visual.material);
        geometry && material
    }

    /// Number of live geometry/material pairs.
    pub fn live(&self) -> usize {
        self.geometries.len().max(self.materials.len())
    }
}

/// Everything needed to spawn a body.
#[derive(Debug, Clone)]
pub struct BodySpec {
    pub kind: BodyKind,
    pub position: Vec3,
    pub radius: f32,
    pub appearance: Appearance,
    pub record: Option<ExoplanetRecord>,
    pub orbit: Option<Orbit>,
}

/// A placed star or planet.
#[derive(Debug, Clone)]
pub struct Body {
    pub kind: BodyKind,
    /// Position in scene-local space (before scene yaw).
    position: Vec3,
    pub radius: f32,
    pub appearance: Appearance,
    /// Originating catalog row.
    pub record: Option<ExoplanetRecord>,
    pub orbit: Option<Orbit>,
    pub visual: Visual,
}

impl Body {
    /// Position in scene-local space.
    pub fn position(&self) -> Vec3 {
        self.position
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Owner of all bodies and their visuals, plus scene-wide transforms.
#[derive(Debug, Default)]
pub struct SceneGraph {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
    visuals: VisualPool,
    yaw: f32,
    background_tilt: Vec2,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a body, allocating its visual.
    pub fn spawn(&mut self, spec: BodySpec) -> BodyId {
        let body = Body {
            kind: spec.kind,
            position: spec.position,
            radius: spec.radius,
            appearance: spec.appearance,
            record: spec.record,
            orbit: spec.orbit,
            visual: self.visuals.allocate(),
        };
        self.len += 1;

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyId {
                index,
                generation: slot.generation,
            };
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyId {
            index,
            generation: 0,
        }
    }

    /// Remove a body and release its visual. Absent or stale ids are a no-op.
    pub fn despawn(&mut self, id: BodyId) -> bool {
        let Some(slot) = self.slots.get_mut(id.index as usize) else {
            return false;
        };
        if slot.generation != id.generation {
            return false;
        }
        let Some(body) = slot.body.take() else {
            return false;
        };
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;
        self.visuals.release(body.visual);
        true
    }

    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.body.as_mut())
    }

    pub(crate) fn set_position(&mut self, id: BodyId, position: Vec3) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.position = position;
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, id: BodyId) -> bool {
        self.get(id).is_some()
    }

    /// Live bodies in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (BodyId, &Body)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body.as_ref().map(|body| {
                (
                    BodyId {
                        index: index as u32,
                        generation: slot.generation,
                    },
                    body,
                )
            })
        })
    }

    /// Number of live bodies.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of live geometry/material pairs.
    pub fn live_visuals(&self) -> usize {
        self.visuals.live()
    }

    /// Scene yaw in radians, applied on top of every body's local position.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub(crate) fn add_yaw(&mut self, delta: f32) {
        self.yaw = (self.yaw + delta) % std::f32::consts::TAU;
    }

    /// Rotation of the scene root.
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.yaw)
    }

    /// Background sphere tilt `(pitch, yaw)` in radians.
    pub fn background_tilt(&self) -> Vec2 {
        self.background_tilt
    }

    pub(crate) fn set_background_tilt(&mut self, tilt: Vec2) {
        self.background_tilt = tilt;
    }

    /// Position after the scene root rotation.
    pub fn world_position(&self, id: BodyId) -> Option<Vec3> {
        self.get(id).map(|body| self.rotation() * body.position)
    }
}
