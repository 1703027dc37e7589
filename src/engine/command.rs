//! The engine's complete interactive vocabulary.
//!
//! Every pose change, whether triggered by a touch gesture, a mouse drag, a
//! key press, or a programmatic call, is represented as a
//! `GestureCommand`. Consumers construct commands and pass them to
//! [`CubeEngine::execute`](super::CubeEngine::execute).

use glam::Vec2;

/// A discrete gesture that changes the model pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommand {
    /// Double-tap: restore the default pose.
    ResetPose,
    /// One-finger drag: trackball rotation.
    Rotate {
        /// Finger movement since the previous event, in pixels.
        delta: Vec2,
        /// Current finger position, in pixels.
        position: Vec2,
    },
    /// Pinch: multiply the model scale.
    Scale {
        /// Ratio of the current to the previous finger spread.
        factor: f32,
    },
    /// Two-finger drag: move the model in its x-y plane.
    Translate {
        /// Centroid movement since the previous event, in pixels.
        delta: Vec2,
    },
}
