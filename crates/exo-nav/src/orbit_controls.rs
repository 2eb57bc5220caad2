//! Free-orbit camera controls around a focused star: drag to rotate, wheel
//! to zoom, with damped rotation and no panning.

use exo_scene::SceneCamera;
use glam::{Vec2, Vec3};

/// Spherical camera rig around `target`. Does nothing while disabled.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    enabled: bool,
    target: Vec3,
    /// Azimuth in radians; 0 puts the camera on the target's +Z side.
    yaw: f32,
    /// Elevation above the target's horizontal plane, in radians.
    pitch: f32,
    distance: f32,
    /// Rotation still to be applied, drained by `damping` each update.
    pending: Vec2,
    /// Fraction of pending rotation applied per update.
    pub damping: f32,
    /// Radians per pixel of drag.
    pub rotate_sensitivity: f32,
    /// Distance scale per wheel line.
    pub zoom_factor: f32,
    pub distance_min: f32,
    pub distance_max: f32,
    pub pitch_limit: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enabled: false,
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: 5.0,
            pending: Vec2::ZERO,
            damping: 0.05,
            rotate_sensitivity: 0.005,
            zoom_factor: 0.95,
            distance_min: 1.0,
            distance_max: 500.0,
            pitch_limit: 89.0_f32.to_radians(),
        }
    }
}

impl OrbitControls {
    pub fn new(damping: f32, rotate_sensitivity: f32) -> Self {
        Self {
            damping: damping.clamp(0.0, 1.0),
            rotate_sensitivity,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Lock onto `target`, picking up the camera's current offset so the
    /// view does not jump.
    pub fn enable(&mut self, target: Vec3, camera_position: Vec3) {
        let offset = camera_position - target;
        let distance = offset.length();
        self.target = target;
        self.pending = Vec2::ZERO;
        if distance > 1e-6 {
            self.distance = distance.clamp(self.distance_min, self.distance_max);
            self.yaw = offset.x.atan2(offset.z);
            self.pitch = (offset.y / distance)
                .clamp(-1.0, 1.0)
                .asin()
                .clamp(-self.pitch_limit, self.pitch_limit);
        }
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
        self.pending = Vec2::ZERO;
    }

    /// Queue a drag of `delta` pixels.
    pub fn rotate(&mut self, delta: Vec2) {
        if self.enabled {
            self.pending -= delta * self.rotate_sensitivity;
        }
    }

    /// Positive `amount` (wheel lines) moves closer.
    pub fn zoom(&mut self, amount: f32) {
        if self.enabled {
            self.distance = (self.distance * self.zoom_factor.powf(amount))
                .clamp(self.distance_min, self.distance_max);
        }
    }

    /// Camera position for the current angles.
    pub fn eye(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        self.target
            + Vec3::new(
                self.distance * cos_pitch * sin_yaw,
                self.distance * sin_pitch,
                self.distance * cos_pitch * cos_yaw,
            )
    }

    /// Apply a damped share of the pending rotation and place the camera.
    /// Returns `false` (camera untouched) while disabled.
    pub fn update(&mut self, camera: &mut SceneCamera) -> bool {
        if !self.enabled {
            return false;
        }
        let step = self.pending * self.damping;
        self.pending -= step;
        self.yaw += step.x;
        self.pitch = (self.pitch + step.y).clamp(-self.pitch_limit, self.pitch_limit);

        camera.position = self.eye();
        camera.look_at(self.target);
        true
    }
}
