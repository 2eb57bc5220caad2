//! Per-frame pointer state: cursor position and motion, buttons, wheel, and
//! click-versus-drag detection.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of wheel travel that count as one line.
const PIXELS_PER_LINE: f64 = 40.0;

#[derive(Debug, Clone, Copy, Default)]
struct ButtonFrame {
    held: bool,
    just_pressed: bool,
    just_released: bool,
    /// Cursor position when the button went down.
    press_origin: Option<Vec2>,
}

fn slot(button: MouseButton) -> usize {
    match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        _ => 3,
    }
}

/// Accumulates winit pointer events between [`end_frame`](Self::end_frame)
/// calls.
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Vec2,
    delta: Vec2,
    moved: bool,
    buttons: [ButtonFrame; 4],
    scroll: f32,
    in_window: bool,
}

impl MouseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// `CursorMoved`, in physical pixels from the top-left corner.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let position = Vec2::new(x as f32, y as f32);
        if self.in_window || self.moved {
            self.delta += position - self.position;
        }
        self.position = position;
        self.moved = true;
        self.in_window = true;
    }

    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        let frame = &mut self.buttons[slot(button)];
        match state {
            ElementState::Pressed => {
                frame.held = true;
                frame.just_pressed = true;
                frame.press_origin = Some(self.position);
            }
            ElementState::Released => {
                frame.held = false;
                frame.just_released = true;
            }
        }
    }

    /// Positive is away from the user (zoom in).
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        self.scroll += match delta {
            MouseScrollDelta::LineDelta(_, y) => y,
            MouseScrollDelta::PixelDelta(pos) => (pos.y / PIXELS_PER_LINE) as f32,
        };
    }

    pub fn on_cursor_entered(&mut self) {
        self.in_window = true;
    }

    pub fn on_cursor_left(&mut self) {
        self.in_window = false;
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cursor travel since the last frame.
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    /// Whether a `CursorMoved` arrived this frame.
    pub fn moved(&self) -> bool {
        self.moved
    }

    pub fn is_held(&self, button: MouseButton) -> bool {
        self.buttons[slot(button)].held
    }

    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.buttons[slot(button)].just_pressed
    }

    pub fn just_released(&self, button: MouseButton) -> bool {
        self.buttons[slot(button)].just_released
    }

    /// Distance between where `button` went down and where it came up, for a
    /// release that happened this frame.
    pub fn release_travel(&self, button: MouseButton) -> Option<f32> {
        let frame = self.buttons[slot(button)];
        if !frame.just_released {
            return None;
        }
        frame
            .press_origin
            .map(|origin| origin.distance(self.position))
    }

    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    pub fn in_window(&self) -> bool {
        self.in_window
    }

    /// Clear motion, wheel and button transitions. Held buttons stay held.
    pub fn end_frame(&mut self) {
        self.delta = Vec2::ZERO;
        self.moved = false;
        self.scroll = 0.0;
        for frame in &mut self.buttons {
            frame.just_pressed = false;
            frame.just_released = false;
        }
    }
}
