//! Input handling: event types, drag sessions, and the input processor
//! that converts raw window events into viewer commands.

/// Per-gesture drag tracking.
pub mod drag;
/// Platform-agnostic input events.
pub mod event;
/// Converts raw events into viewer commands.
pub mod processor;

pub use drag::DragSession;
pub use event::{InputEvent, KeyAction, Modifiers, MouseButton};
pub use processor::{InputProcessor, ViewerCommand};
