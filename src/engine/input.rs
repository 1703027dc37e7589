//! Gesture forwarding and input dispatch for CubeEngine

use glam::Vec2;

use super::command::GestureCommand;
use super::CubeEngine;
use crate::input::InputEvent;

impl CubeEngine {
    /// Double-tap: restore the default pose.
    pub fn double_tap_action(&mut self) {
        self.camera.reset();
    }

    /// One-finger drag: rotate by `delta` ending at `position` (pixels).
    pub fn scroll_action(&mut self, delta: Vec2, position: Vec2) {
        self.camera.rotate(delta, position);
    }

    /// Pinch: multiply the model scale by `factor`.
    pub fn scale_action(&mut self, factor: f32) {
        self.camera.scale(factor);
    }

    /// Two-finger drag: move the model by `delta` pixels.
    pub fn move_action(&mut self, delta: Vec2) {
        self.camera.translate(delta);
    }

    /// Execute a gesture command.
    pub fn execute(&mut self, command: GestureCommand) {
        match command {
            GestureCommand::ResetPose => self.double_tap_action(),
            GestureCommand::Rotate { delta, position } => {
                self.scroll_action(delta, position);
            }
            GestureCommand::Scale { factor } => self.scale_action(factor),
            GestureCommand::Translate { delta } => self.move_action(delta),
        }
    }

    /// Process a platform-agnostic input event.
    ///
    /// Returns `true` if the event produced at least one gesture (the pose
    /// may have changed and a redraw is worthwhile).
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        let commands = self.input.handle_event(event);
        let changed = !commands.is_empty();
        for command in commands {
            self.execute(command);
        }
        changed
    }

    /// Look up a key string (winit `KeyCode` debug format, e.g. `"KeyR"`)
    /// and execute the bound action. Returns `true` if a binding matched.
    pub fn handle_key_press(&mut self, key: &str) -> bool {
        let Some(action) = self.options.keybindings.lookup(key) else {
            return false;
        };
        let command = action.to_command(self.options.camera.wheel_zoom_step);
        self.execute(command);
        true
    }
}
