//! Device input to session events.

use exo_config::InputConfig;
use exo_input::{ControlAction, ControlBindings, KeyboardState, MouseState, resolve_controls};

use crate::session::SessionEvent;

impl From<ControlAction> for SessionEvent {
    fn from(action: ControlAction) -> Self {
        match action {
            ControlAction::Select { pointer } => SessionEvent::Select { pointer },
            ControlAction::PointerMoved { pointer } => SessionEvent::PointerMoved { pointer },
            ControlAction::Cancel => SessionEvent::Cancel,
            ControlAction::GenerateSystem => SessionEvent::GenerateSystem,
            ControlAction::ToggleRotation => SessionEvent::ToggleRotation,
            ControlAction::Orbit { delta } => SessionEvent::Orbit { delta },
            ControlAction::Zoom { amount } => SessionEvent::Zoom { amount },
        }
    }
}

/// Collects keyboard and mouse events for a frame and hands them over as
/// session events.
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
    bindings: ControlBindings,
}

impl InputRouter {
    pub fn new(bindings: ControlBindings) -> Self {
        Self {
            keyboard: KeyboardState::new(),
            mouse: MouseState::new(),
            bindings,
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        Self::new(ControlBindings::with_overrides(&config.keybindings))
    }

    pub fn bindings(&self) -> &ControlBindings {
        &self.bindings
    }

    /// Resolve this frame's input and start the next frame.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        let events = resolve_controls(&self.keyboard, &self.mouse, &self.bindings)
            .into_iter()
            .map(SessionEvent::from)
            .collect();
        self.keyboard.end_frame();
        self.mouse.end_frame();
        events
    }
}
