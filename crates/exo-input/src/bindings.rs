//! Explorer controls and the keys/buttons bound to them.
//!
//! Key names are winit [`KeyCode`] variant names (`"Escape"`, `"KeyG"`,
//! `"Digit1"`, ...). Overrides come from the config file as
//! `control name -> key name`; unknown names are logged and skipped.

use std::collections::HashMap;

use glam::Vec2;
use tracing::warn;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;
use crate::mouse::MouseState;

/// Pointer travel (pixels) above which a press/release is a drag, not a
/// click.
const CLICK_SLOP: f32 = 4.0;

/// Something the user asked the explorer to do this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    /// Click at a viewport position.
    Select { pointer: Vec2 },
    /// Pointer moved to a viewport position.
    PointerMoved { pointer: Vec2 },
    Cancel,
    GenerateSystem,
    ToggleRotation,
    /// Drag with the orbit button held, in pixels.
    Orbit { delta: Vec2 },
    /// Wheel travel in lines, positive zooms in.
    Zoom { amount: f32 },
}

/// Rebindable keyboard controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    Cancel,
    GenerateSystem,
    ToggleRotation,
}

impl ControlKind {
    pub const ALL: [ControlKind; 3] = [
        ControlKind::Cancel,
        ControlKind::GenerateSystem,
        ControlKind::ToggleRotation,
    ];

    /// Name used in config overrides.
    pub fn name(self) -> &'static str {
        match self {
            ControlKind::Cancel => "cancel",
            ControlKind::GenerateSystem => "generate_system",
            ControlKind::ToggleRotation => "toggle_rotation",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    fn action(self) -> ControlAction {
        match self {
            ControlKind::Cancel => ControlAction::Cancel,
            ControlKind::GenerateSystem => ControlAction::GenerateSystem,
            ControlKind::ToggleRotation => ControlAction::ToggleRotation,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControlBindings {
    keys: HashMap<ControlKind, KeyCode>,
    /// Button that selects on click and orbits on drag.
    pub pointer_button: MouseButton,
}

impl Default for ControlBindings {
    fn default() -> Self {
        let keys = HashMap::from([
            (ControlKind::Cancel, KeyCode::Escape),
            (ControlKind::GenerateSystem, KeyCode::KeyG),
            (ControlKind::ToggleRotation, KeyCode::KeyR),
        ]);
        Self {
            keys,
            pointer_button: MouseButton::Left,
        }
    }
}

impl ControlBindings {
    /// Defaults with config overrides applied.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut bindings = Self::default();
        for (control, key) in overrides {
            let Some(kind) = ControlKind::from_name(control) else {
                warn!(control = %control, "unknown control in keybindings, skipping");
                continue;
            };
            let Some(code) = parse_key_code(key) else {
                warn!(control = %control, key = %key, "unknown key name, keeping default");
                continue;
            };
            bindings.bind(kind, code);
        }
        bindings
    }

    pub fn bind(&mut self, kind: ControlKind, code: KeyCode) {
        self.keys.insert(kind, code);
    }

    pub fn key(&self, kind: ControlKind) -> Option<KeyCode> {
        self.keys.get(&kind).copied()
    }
}

/// Translate this frame's device state into controls. Order is stable:
/// pointer motion, orbit drag, zoom, select, then keyboard controls.
pub fn resolve_controls(
    keyboard: &KeyboardState,
    mouse: &MouseState,
    bindings: &ControlBindings,
) -> Vec<ControlAction> {
    let mut actions = Vec::new();
    let button = bindings.pointer_button;

    if mouse.moved() {
        actions.push(ControlAction::PointerMoved {
            pointer: mouse.position(),
        });
    }
    if mouse.is_held(button) && !mouse.just_pressed(button) && mouse.delta() != Vec2::ZERO {
        actions.push(ControlAction::Orbit {
            delta: mouse.delta(),
        });
    }
    if mouse.scroll() != 0.0 {
        actions.push(ControlAction::Zoom {
            amount: mouse.scroll(),
        });
    }
    if mouse
        .release_travel(button)
        .is_some_and(|travel| travel <= CLICK_SLOP)
    {
        actions.push(ControlAction::Select {
            pointer: mouse.position(),
        });
    }

    for kind in ControlKind::ALL {
        if bindings.key(kind).is_some_and(|code| keyboard.just_pressed(code)) {
            actions.push(kind.action());
        }
    }
    actions
}

/// Parse a winit [`KeyCode`] variant name.
pub fn parse_key_code(name: &str) -> Option<KeyCode> {
    let code = match name {
        "Escape" => KeyCode::Escape,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Tab" => KeyCode::Tab,
        "Backspace" => KeyCode::Backspace,
        "Delete" => KeyCode::Delete,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        _ => return None,
    };
    Some(code)
}
