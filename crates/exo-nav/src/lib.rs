//! Camera navigation: the overview / transitioning / focused state machine
//! and the free-orbit controls used while a star is focused.

pub mod orbit_controls;
pub mod state;
pub mod transition;

pub use orbit_controls::OrbitControls;
pub use state::{
    CameraView, FocusTarget, NavEffect, NavEvent, NavMode, NavigationParams, NavigationState,
};
pub use transition::{CameraTransition, TransitionDirection};
