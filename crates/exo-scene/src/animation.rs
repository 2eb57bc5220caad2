//! Per-frame scene motion: planet orbits, scene yaw and background parallax.

use glam::Vec2;

use crate::graph::{BodyId, SceneGraph};

/// Advance each planet's orbit angle by `step` radians and move it to the
/// matching point on its orbit. Planets whose orbit center is gone stay put.
/// Returns how many planets moved.
pub fn advance_orbits(scene: &mut SceneGraph, planets: &[BodyId], step: f32) -> usize {
    let mut moved = 0;
    for &id in planets {
        let Some(orbit) = scene.get(id).and_then(|body| body.orbit) else {
            continue;
        };
        let Some(center) = scene.get(orbit.center).map(|body| body.position()) else {
            continue;
        };
        let Some(body) = scene.get_mut(id) else {
            continue;
        };
        let Some(orbit) = body.orbit.as_mut() else {
            continue;
        };
        orbit.angle += step;
        let position = center + orbit.offset();
        scene.set_position(id, position);
        moved += 1;
    }
    moved
}

/// Spin the scene root about Y.
pub fn rotate_scene(scene: &mut SceneGraph, step: f32) {
    scene.add_yaw(step);
}

/// Tilt the background from the pointer position in normalized device
/// coordinates: pitch follows the vertical axis, yaw the horizontal.
pub fn apply_parallax(scene: &mut SceneGraph, pointer_ndc: Vec2, strength: f32) {
    scene.set_background_tilt(Vec2::new(pointer_ndc.y * strength, pointer_ndc.x * strength));
}
