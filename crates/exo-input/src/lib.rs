//! Pointer and keyboard input: per-frame device state from winit events and
//! the bindings that turn it into explorer controls.

pub mod bindings;
pub mod keyboard;
pub mod mouse;

pub use bindings::{ControlAction, ControlBindings, ControlKind, parse_key_code, resolve_controls};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use mouse::MouseState;
