//! Pointer picking: viewport position to camera ray to nearest body.
//!
//! Bodies are tested as spheres at their world position. The candidate
//! slice decides what is pickable; the nearest hit wins and equal distances
//! go to the earlier candidate.

use glam::{Vec2, Vec3};

use crate::camera::SceneCamera;
use crate::graph::{BodyId, SceneGraph};

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction.
    pub dir: Vec3,
}

impl Ray {
    /// Build a ray; `dir` is normalized (zero stays zero and never hits).
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub body: BodyId,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
    pub point: Vec3,
}

/// Viewport pixels (origin top-left, y down) to normalized device
/// coordinates (origin center, y up).
pub fn viewport_to_ndc(pointer: Vec2, viewport: Vec2) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        (pointer.x / viewport.x) * 2.0 - 1.0,
        -(pointer.y / viewport.y) * 2.0 + 1.0,
    )
}

/// Nearest candidate intersected by `ray`. Candidates no longer in the
/// scene are skipped.
pub fn pick(scene: &SceneGraph, ray: Ray, candidates: &[BodyId]) -> Option<PickHit> {
    if ray.dir == Vec3::ZERO {
        return None;
    }

    let mut best: Option<PickHit> = None;
    for &id in candidates {
        let (Some(body), Some(center)) = (scene.get(id), scene.world_position(id)) else {
            continue;
        };
        let Some(t) = ray_sphere_hit_t(ray, center, body.radius) else {
            continue;
        };
        if best.is_none_or(|b| t < b.distance) {
            best = Some(PickHit {
                body: id,
                distance: t,
                point: ray.at(t),
            });
        }
    }
    best
}

/// Pick through a pointer position in viewport pixels.
pub fn pick_at_pointer(
    scene: &SceneGraph,
    camera: &SceneCamera,
    pointer: Vec2,
    viewport: Vec2,
    candidates: &[BodyId],
) -> Option<PickHit> {
    let ray = camera.ray_from_ndc(viewport_to_ndc(pointer, viewport));
    pick(scene, ray, candidates)
}

/// Distance along the ray to the first surface crossing in front of the
/// origin. From inside the sphere this is the exit point.
fn ray_sphere_hit_t(ray: Ray, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray.origin - center;
    let b = oc.dot(ray.dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_d;
    (far >= 0.0).then_some(far)
}
