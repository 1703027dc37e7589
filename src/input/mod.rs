//! Input handling: event types, gesture state machines, and the input
//! processor that converts raw window events into gesture commands.

/// Platform-agnostic input events.
pub mod event;
/// Keyboard action vocabulary.
pub mod keyboard;
/// Click/double-click state machine and mouse position tracking.
pub(crate) mod mouse;
/// Converts raw events into gesture commands.
pub mod processor;
/// Multi-touch gesture recognizer.
pub(crate) mod touch;

pub use event::{InputEvent, MouseButton, TouchPhase};
pub use keyboard::KeyAction;
pub use processor::InputProcessor;
