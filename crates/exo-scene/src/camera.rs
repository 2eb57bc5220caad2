//! Perspective camera: view/projection matrices for the renderer and
//! pointer rays for picking.

use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::picking::Ray;

/// A perspective camera positioned in world space.
#[derive(Debug, Clone)]
pub struct SceneCamera {
    pub position: Vec3,
    /// Orientation as a unit quaternion; the camera looks down its local -Z.
    pub rotation: Quat,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height.
    pub aspect_ratio: f32,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

impl SceneCamera {
    /// Camera at `position` looking at the origin.
    pub fn new(position: Vec3, fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y,
            aspect_ratio,
            near,
            far,
        };
        camera.look_at(Vec3::ZERO);
        camera
    }

    /// Compute the view matrix (inverse of camera transform).
    pub fn view_matrix(&self) -> Mat4 {
        (Mat4::from_translation(self.position) * Mat4::from_quat(self.rotation)).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect_ratio, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    /// The up direction vector (+Y in camera space).
    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    /// The right direction vector (+X in camera space).
    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Turn the camera to face `target`, keeping world +Y as up. Does
    /// nothing when the target coincides with the camera.
    pub fn look_at(&mut self, target: Vec3) {
        let to_target = target - self.position;
        if to_target.length_squared() < 1e-12 {
            return;
        }
        let forward = to_target.normalize();
        let mut right = forward.cross(Vec3::Y);
        if right.length_squared() < 1e-8 {
            // Looking straight up or down: pick any horizontal right vector.
            right = forward.cross(Vec3::Z);
        }
        let right = right.normalize();
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect_ratio = width / height;
        }
    }

    /// Ray from the camera through a point in normalized device coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let half_height = (self.fov_y * 0.5).tan();
        let half_width = half_height * self.aspect_ratio;
        let dir = self.forward()
            + self.right() * (ndc.x * half_width)
            + self.up() * (ndc.y * half_height);
        Ray::new(self.position, dir)
    }

    /// Project a world point to normalized device coordinates. `None` when
    /// the point is behind the camera.
    pub fn world_to_ndc(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self::new(
            Vec3::new(0.0, 0.0, 50.0),
            75.0_f32.to_radians(),
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}
