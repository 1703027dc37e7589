use serde::{Deserialize, Serialize};

use crate::engine::command::GestureCommand;

/// Discrete pose actions that can be bound to keys.
///
/// Serde serializes as `snake_case` strings so TOML presets stay readable:
/// ```toml
/// [keybindings.bindings]
/// reset_pose = "KeyR"
/// zoom_in = "Equal"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyAction {
    /// Restore the default pose (same as a double-tap).
    ResetPose,
    /// Grow the model by one wheel step.
    ZoomIn,
    /// Shrink the model by one wheel step.
    ZoomOut,
}

impl KeyAction {
    /// Convert to a gesture, using `wheel_zoom_step` for the zoom actions.
    #[must_use]
    pub fn to_command(self, wheel_zoom_step: f32) -> GestureCommand {
        match self {
            Self::ResetPose => GestureCommand::ResetPose,
            Self::ZoomIn => GestureCommand::Scale {
                factor: wheel_zoom_step.exp(),
            },
            Self::ZoomOut => GestureCommand::Scale {
                factor: (-wheel_zoom_step).exp(),
            },
        }
    }
}
