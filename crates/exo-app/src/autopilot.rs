//! Scripted tour for headless runs. Feeds synthetic device input through the
//! same [`InputRouter`] a window would, one step per frame:
//! click the star nearest the screen center, wait for focus, click a planet, linger, press
//! cancel and wait for the overview. In a single system it clicks a planet
//! and then asks for a new system.

use exo_config::SceneMode;
use exo_input::{ControlKind, RawKeyEvent};
use exo_scene::BodyId;
use glam::Vec2;
use tracing::{info, warn};
use winit::event::ElementState;

use crate::controls::InputRouter;
use crate::session::Session;

/// Frames to wait for a transition before giving up.
const MAX_WAIT_FRAMES: u32 = 600;
/// Frames spent looking at the selected planet.
const LINGER_FRAMES: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutopilotStep {
    ClickStar,
    AwaitFocus { waited: u32 },
    ClickPlanet,
    Linger { remaining: u32 },
    AwaitOverview { waited: u32 },
    Done,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    mode: SceneMode,
    step: AutopilotStep,
}

impl Autopilot {
    pub fn new(mode: SceneMode) -> Self {
        let step = match mode {
            SceneMode::MultiStar => AutopilotStep::ClickStar,
            SceneMode::SingleSystem => AutopilotStep::ClickPlanet,
        };
        Self { mode, step }
    }

    pub fn step(&self) -> AutopilotStep {
        self.step
    }

    pub fn is_done(&self) -> bool {
        self.step == AutopilotStep::Done
    }

    /// Queue this frame's input.
    pub fn drive(&mut self, session: &Session, input: &mut InputRouter) {
        self.step = match self.step {
            AutopilotStep::ClickStar => {
                match most_central(session, session.stars()) {
                    Some(pointer) => {
                        info!(?pointer, "autopilot: clicking a star");
                        click(input, pointer);
                        AutopilotStep::AwaitFocus { waited: 0 }
                    }
                    None => {
                        warn!("autopilot: no star in view");
                        AutopilotStep::Done
                    }
                }
            }
            AutopilotStep::AwaitFocus { waited } => {
                if session.navigation().focused().is_some() {
                    AutopilotStep::ClickPlanet
                } else if session.navigation().is_overview() || waited >= MAX_WAIT_FRAMES {
                    warn!("autopilot: star was not focused");
                    AutopilotStep::Done
                } else {
                    AutopilotStep::AwaitFocus { waited: waited + 1 }
                }
            }
            AutopilotStep::ClickPlanet => {
                match most_central(session, session.planets().iter().copied()) {
                    Some(pointer) => {
                        info!(?pointer, "autopilot: clicking a planet");
                        click(input, pointer);
                        AutopilotStep::Linger {
                            remaining: LINGER_FRAMES,
                        }
                    }
                    None => {
                        warn!("autopilot: no planet in view");
                        AutopilotStep::Done
                    }
                }
            }
            AutopilotStep::Linger { remaining } if remaining > 0 => AutopilotStep::Linger {
                remaining: remaining - 1,
            },
            AutopilotStep::Linger { .. } => match self.mode {
                SceneMode::MultiStar => {
                    press(input, ControlKind::Cancel);
                    AutopilotStep::AwaitOverview { waited: 0 }
                }
                SceneMode::SingleSystem => {
                    press(input, ControlKind::GenerateSystem);
                    AutopilotStep::Done
                }
            },
            AutopilotStep::AwaitOverview { waited } => {
                if session.navigation().is_overview() || waited >= MAX_WAIT_FRAMES {
                    AutopilotStep::Done
                } else {
                    AutopilotStep::AwaitOverview { waited: waited + 1 }
                }
            }
            AutopilotStep::Done => AutopilotStep::Done,
        };
    }
}

/// Screen position of the on-screen body closest to the viewport center.
pub(crate) fn most_central(
    session: &Session,
    bodies: impl IntoIterator<Item = BodyId>,
) -> Option<Vec2> {
    let center = session.viewport() * 0.5;
    bodies
        .into_iter()
        .filter_map(|body| session.screen_position(body))
        .min_by(|a, b| a.distance_squared(center).total_cmp(&b.distance_squared(center)))
}

fn click(input: &mut InputRouter, pointer: Vec2) {
    let button = input.bindings().pointer_button;
    input
        .mouse
        .on_cursor_moved(f64::from(pointer.x), f64::from(pointer.y));
    input.mouse.on_button(button, ElementState::Pressed);
    input.mouse.on_button(button, ElementState::Released);
}

fn press(input: &mut InputRouter, kind: ControlKind) {
    let Some(code) = input.bindings().key(kind) else {
        warn!(control = kind.name(), "autopilot: control has no key");
        return;
    };
    input.keyboard.process_raw(RawKeyEvent::pressed(code));
    input.keyboard.process_raw(RawKeyEvent::released(code));
}
