//! Linear camera flights between two poses, stepped once per frame.

use glam::Vec3;

use crate::state::FocusTarget;

/// Progress values this close to 1 count as arrived.
const COMPLETION_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionDirection {
    /// Flying in to focus on a star.
    ToStar(FocusTarget),
    /// Flying back out to the initial pose, away from the star.
    ToOverview(FocusTarget),
}

/// An in-flight camera move. Position and look target are both linear in
/// `progress`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraTransition {
    pub direction: TransitionDirection,
    pub start: Vec3,
    pub end: Vec3,
    pub look_from: Vec3,
    pub look_to: Vec3,
    progress: f32,
    step: f32,
}

impl CameraTransition {
    /// `step` is the progress added per frame, clamped to `(0, 1]`.
    pub fn new(
        direction: TransitionDirection,
        start: Vec3,
        end: Vec3,
        look_from: Vec3,
        look_to: Vec3,
        step: f32,
    ) -> Self {
        Self {
            direction,
            start,
            end,
            look_from,
            look_to,
            progress: 0.0,
            step: step.clamp(f32::EPSILON, 1.0),
        }
    }

    /// Flight towards a star, stopping `safe_distance` short of its center
    /// on the side the camera approaches from.
    pub fn to_star(camera: Vec3, target: FocusTarget, safe_distance: f32, step: f32) -> Self {
        let away = (camera - target.position).try_normalize().unwrap_or(Vec3::Z);
        Self::new(
            TransitionDirection::ToStar(target),
            camera,
            target.position + away * safe_distance,
            target.position,
            target.position,
            step,
        )
    }

    /// Flight from the focused star back to `home`, with the look target
    /// sliding from the star to the scene origin.
    pub fn to_overview(camera: Vec3, from: FocusTarget, home: Vec3, step: f32) -> Self {
        Self::new(
            TransitionDirection::ToOverview(from),
            camera,
            home,
            from.position,
            Vec3::ZERO,
            step,
        )
    }

    /// Normalized progress in `[0, 1]`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Advance by one frame. Returns `true` once the flight has arrived;
    /// further calls leave progress at 1.
    pub fn advance(&mut self) -> bool {
        if self.is_complete() {
            return true;
        }
        self.progress += self.step;
        if self.progress >= 1.0 - COMPLETION_EPSILON {
            self.progress = 1.0;
        }
        self.is_complete()
    }

    pub fn position(&self) -> Vec3 {
        self.start.lerp(self.end, self.progress)
    }

    pub fn look_at(&self) -> Vec3 {
        self.look_from.lerp(self.look_to, self.progress)
    }
}
