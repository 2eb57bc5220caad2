//! Exoplanet explorer application: the session context tying catalog,
//! scene, navigation and input together, plus frame pacing and a scripted
//! tour for headless runs.

pub mod autopilot;
pub mod controls;
pub mod frame_loop;
pub mod platform;
pub mod session;

pub use autopilot::{Autopilot, AutopilotStep};
pub use controls::InputRouter;
pub use frame_loop::FrameLoop;
pub use platform::{PlatformDirs, PlatformError};
pub use session::{FrameSummary, NavPhase, Session, SessionEvent, SessionSettings};

#[cfg(test)]
mod tests;
