//! Camera and model-transform system.
//!
//! A fixed perspective camera looks at a model whose pose (position,
//! orientation, scale) is driven by gestures. The controller composes the
//! model-view-projection matrix the renderer uploads each frame.

/// Gesture-driven pose controller.
pub mod controller;
/// Fixed camera and GPU uniform types.
pub mod core;
/// Model pose value type.
pub mod pose;
/// Virtual trackball math.
pub mod trackball;
