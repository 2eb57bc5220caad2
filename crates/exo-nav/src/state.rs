//! Navigation state machine.
//!
//! [`NavigationState::handle`] is a pure transition function: it consumes an
//! event plus a read-only view of the camera and returns the effects the
//! caller must apply (camera moves, orbit-control toggles, planet population).
//! It never touches the scene itself.
//!
//! ```text
//! Overview --Pick(star)--> Transitioning(ToStar) --Frame..--> FocusedOnStar
//! FocusedOnStar --Cancel--> Transitioning(ToOverview) --Frame..--> Overview
//! ```

use exo_scene::BodyId;
use glam::Vec3;
use tracing::{debug, info};

use crate::transition::{CameraTransition, TransitionDirection};

/// A star to focus on, with its world position at pick time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusTarget {
    pub body: BodyId,
    pub position: Vec3,
}

/// What the state machine needs to know about the camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraView {
    pub position: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEvent {
    Pick(FocusTarget),
    Cancel,
    /// One animation frame elapsed.
    Frame,
}

/// Work for the caller, in the order it must be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavEffect {
    MoveCamera { position: Vec3, look_at: Vec3 },
    EnableOrbitControls { target: Vec3 },
    DisableOrbitControls,
    PopulatePlanets(BodyId),
    ClearPlanets,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavMode {
    Overview,
    Transitioning(CameraTransition),
    FocusedOnStar(FocusTarget),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationParams {
    /// Camera pose in overview, looking at the origin.
    pub home: Vec3,
    /// Distance kept from a focused star's center.
    pub safe_distance: f32,
    /// Progress added per frame while transitioning.
    pub transition_step: f32,
}

impl Default for NavigationParams {
    fn default() -> Self {
        Self {
            home: Vec3::new(0.0, 0.0, 50.0),
            safe_distance: 5.0,
            transition_step: 0.02,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NavigationState {
    mode: NavMode,
    params: NavigationParams,
}

impl NavigationState {
    pub fn new(params: NavigationParams) -> Self {
        Self {
            mode: NavMode::Overview,
            params,
        }
    }

    pub fn mode(&self) -> &NavMode {
        &self.mode
    }

    pub fn params(&self) -> &NavigationParams {
        &self.params
    }

    pub fn is_overview(&self) -> bool {
        matches!(self.mode, NavMode::Overview)
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.mode, NavMode::Transitioning(_))
    }

    /// The star the camera is locked on, if fully focused.
    pub fn focused(&self) -> Option<FocusTarget> {
        match self.mode {
            NavMode::FocusedOnStar(target) => Some(target),
            _ => None,
        }
    }

    /// Transition progress, if one is in flight.
    pub fn progress(&self) -> Option<f32> {
        match &self.mode {
            NavMode::Transitioning(transition) => Some(transition.progress()),
            _ => None,
        }
    }

    /// Free-orbit controls are enabled exactly while focused.
    pub fn orbit_controls_enabled(&self) -> bool {
        self.focused().is_some()
    }

    pub fn handle(&mut self, event: NavEvent, view: &CameraView) -> Vec<NavEffect> {
        match event {
            NavEvent::Pick(target) => self.on_pick(target, view),
            NavEvent::Cancel => self.on_cancel(view),
            NavEvent::Frame => self.on_frame(),
        }
    }

    /// A star pick while focused on another star refocuses. The explorer
    /// session only offers planets while focused, so this path serves hosts
    /// that pass their own candidate sets.
    fn on_pick(&mut self, target: FocusTarget, view: &CameraView) -> Vec<NavEffect> {
        let mut effects = Vec::new();
        match self.mode {
            NavMode::Transitioning(_) => {
                debug!(star = ?target.body, "pick ignored mid-transition");
                return effects;
            }
            NavMode::FocusedOnStar(current) if current.body == target.body => {
                debug!(star = ?target.body, "pick on focused star ignored");
                return effects;
            }
            NavMode::FocusedOnStar(_) => {
                effects.push(NavEffect::DisableOrbitControls);
                effects.push(NavEffect::ClearPlanets);
            }
            NavMode::Overview => {}
        }

        info!(star = ?target.body, position = ?target.position, "flying to star");
        self.mode = NavMode::Transitioning(CameraTransition::to_star(
            view.position,
            target,
            self.params.safe_distance,
            self.params.transition_step,
        ));
        effects
    }

    fn on_cancel(&mut self, view: &CameraView) -> Vec<NavEffect> {
        let NavMode::FocusedOnStar(from) = self.mode else {
            return Vec::new();
        };
        info!(star = ?from.body, "returning to overview");
        self.mode = NavMode::Transitioning(CameraTransition::to_overview(
            view.position,
            from,
            self.params.home,
            self.params.transition_step,
        ));
        vec![NavEffect::DisableOrbitControls]
    }

    fn on_frame(&mut self) -> Vec<NavEffect> {
        let NavMode::Transitioning(transition) = &mut self.mode else {
            return Vec::new();
        };
        let arrived = transition.advance();
        let transition = *transition;
        let mut effects = vec![NavEffect::MoveCamera {
            position: transition.position(),
            look_at: transition.look_at(),
        }];
        if !arrived {
            return effects;
        }

        match transition.direction {
            TransitionDirection::ToStar(target) => {
                info!(star = ?target.body, "focused on star");
                self.mode = NavMode::FocusedOnStar(target);
                effects.push(NavEffect::EnableOrbitControls {
                    target: target.position,
                });
                effects.push(NavEffect::PopulatePlanets(target.body));
            }
            TransitionDirection::ToOverview(from) => {
                info!(star = ?from.body, "back in overview");
                self.mode = NavMode::Overview;
                effects.push(NavEffect::ClearPlanets);
                effects.push(NavEffect::DisableOrbitControls);
            }
        }
        effects
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(NavigationParams::default())
    }
}
