use serde::{Deserialize, Serialize};

/// Tap and double-tap recognition thresholds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureOptions {
    /// Maximum time between two taps (and duration of a single tap), in
    /// milliseconds.
    pub double_tap_ms: u64,
    /// Movement in pixels beyond which a touch or click becomes a drag.
    pub tap_slop: f32,
    /// Maximum distance in pixels between the two taps of a double-tap.
    pub double_tap_slop: f32,
}

impl Default for GestureOptions {
    fn default() -> Self {
        Self {
            double_tap_ms: 300,
            tap_slop: 10.0,
            double_tap_slop: 40.0,
        }
    }
}

impl GestureOptions {
    /// Double-tap window as a duration.
    pub fn double_tap_window(&self) -> web_time::Duration {
        web_time::Duration::from_millis(self.double_tap_ms)
    }
}
