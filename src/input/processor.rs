//! Converts raw platform events into viewer commands.
//!
//! The `InputProcessor` owns all transient input state (cursor position,
//! one drag session per gesture, key bindings). It is the only thing that
//! sits between raw window events and the engine's camera.

use super::{
    drag::DragSession,
    event::{InputEvent, KeyAction, Modifiers, MouseButton},
};
use crate::options::KeybindingOptions;

/// The viewer's interactive vocabulary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewerCommand {
    /// Orbit by a pixel delta.
    Rotate {
        /// Horizontal pixels.
        dx: f32,
        /// Vertical pixels (down is positive).
        dy: f32,
    },
    /// Pan by a pixel delta.
    Pan {
        /// Horizontal pixels.
        dx: f32,
        /// Vertical pixels (down is positive).
        dy: f32,
    },
    /// Zoom by scroll ticks.
    Zoom {
        /// Positive zooms in.
        delta: f32,
    },
    /// Return the camera to its initial state.
    ResetCamera,
    /// Close the viewer.
    Exit,
}

impl From<KeyAction> for ViewerCommand {
    fn from(action: KeyAction) -> Self {
        match action {
            KeyAction::ResetCamera => Self::ResetCamera,
            KeyAction::Exit => Self::Exit,
        }
    }
}

/// Converts raw window events into [`ViewerCommand`]s.
///
/// Left drag rotates. Right drag, middle drag, and shift + left drag pan.
/// Only one gesture runs at a time: pressing a button for the other gesture
/// mid-drag is ignored.
///
/// ```ignore
/// if let Some(cmd) = input.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    /// Last known cursor position in physical pixels.
    cursor: (f64, f64),
    rotate: DragSession,
    pan: DragSession,
    /// Button that started the active pan gesture.
    pan_button: Option<MouseButton>,
    key_bindings: KeybindingOptions,
}

impl InputProcessor {
    /// Create a new processor with default key bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a processor with custom key bindings.
    #[must_use]
    pub fn with_key_bindings(key_bindings: KeybindingOptions) -> Self {
        Self {
            key_bindings,
            ..Self::default()
        }
    }

    /// Last known cursor position in physical pixels.
    #[must_use]
    pub fn cursor(&self) -> (f64, f64) {
        self.cursor
    }

    /// Rotate gesture state.
    #[must_use]
    pub fn rotate_session(&self) -> &DragSession {
        &self.rotate
    }

    /// Pan gesture state.
    #[must_use]
    pub fn pan_session(&self) -> &DragSession {
        &self.pan
    }

    /// Process a raw input event and return zero or one commands.
    pub fn handle_event(&mut self, event: InputEvent) -> Option<ViewerCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => self.handle_cursor_moved(x, y),
            InputEvent::MouseButton {
                button,
                pressed,
                modifiers,
            } => {
                if pressed {
                    self.handle_press(button, modifiers);
                } else {
                    self.handle_release(button);
                }
                None
            }
            InputEvent::Scroll { delta } => {
                (delta != 0.0).then_some(ViewerCommand::Zoom { delta })
            }
            InputEvent::KeyPressed { key } => {
                self.key_bindings.lookup(&key).map(ViewerCommand::from)
            }
        }
    }

    fn handle_cursor_moved(&mut self, x: f64, y: f64) -> Option<ViewerCommand> {
        self.cursor = (x, y);
        let (command, delta) = if let Some(delta) = self.rotate.motion(self.cursor) {
            (Gesture::Rotate, delta)
        } else {
            (Gesture::Pan, self.pan.motion(self.cursor)?)
        };

        let (dx, dy) = (delta.0 as f32, delta.1 as f32);
        if dx == 0.0 && dy == 0.0 {
            return None;
        }
        Some(match command {
            Gesture::Rotate => ViewerCommand::Rotate { dx, dy },
            Gesture::Pan => ViewerCommand::Pan { dx, dy },
        })
    }

    fn handle_press(&mut self, button: MouseButton, modifiers: Modifiers) {
        if self.rotate.is_active() || self.pan.is_active() {
            return;
        }
        match (button, modifiers.shift) {
            (MouseButton::Left, false) => self.rotate.begin(self.cursor),
            (MouseButton::Left, true) | (MouseButton::Right | MouseButton::Middle, _) => {
                self.pan.begin(self.cursor);
                self.pan_button = Some(button);
            }
            (MouseButton::Other, _) => {}
        }
    }

    fn handle_release(&mut self, button: MouseButton) {
        if button == MouseButton::Left && self.rotate.is_active() {
            self.rotate.end();
        }
        if self.pan_button == Some(button) {
            self.pan.end();
            self.pan_button = None;
        }
    }
}

#[derive(Clone, Copy)]
enum Gesture {
    Rotate,
    Pan,
}
