//! Converts raw platform events into gesture commands.
//!
//! The `InputProcessor` owns all transient input state (mouse tracking,
//! drag detection, double-click timing, active touches, modifier keys). It
//! is the only thing that sits between raw window events and the engine's
//! [`execute`](crate::CubeEngine::execute) method.

use glam::Vec2;
use web_time::Instant;

use super::event::{InputEvent, MouseButton};
use super::mouse::{ClickResult, MouseState};
use super::touch::TouchTracker;
use crate::engine::command::GestureCommand;
use crate::options::{GestureOptions, Options};

/// Converts raw window events into [`GestureCommand`]s.
///
/// Touch input maps one-to-one onto the gesture vocabulary. Mouse input
/// emulates it: left drag rotates, shift+left or right drag translates,
/// the wheel scales, and a left double-click resets.
///
/// # Usage
///
/// ```ignore
/// for cmd in input_processor.handle_event(event) {
///     engine.execute(cmd);
/// }
/// ```
pub struct InputProcessor {
    /// Mouse tracking and double-click state machine.
    mouse: MouseState,
    /// Active touch contacts.
    touches: TouchTracker,
    /// Whether the primary mouse button is currently held.
    left_pressed: bool,
    /// Whether the secondary mouse button is currently held.
    right_pressed: bool,
    /// Whether the shift modifier is currently held.
    shift_pressed: bool,
    gestures: GestureOptions,
    wheel_zoom_step: f32,
}

impl InputProcessor {
    /// Create a processor using the gesture thresholds from `options`.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            mouse: MouseState::new(),
            touches: TouchTracker::default(),
            left_pressed: false,
            right_pressed: false,
            shift_pressed: false,
            gestures: options.gestures.clone(),
            wheel_zoom_step: options.camera.wheel_zoom_step,
        }
    }

    /// Replace gesture thresholds, keeping transient state.
    pub fn set_options(&mut self, options: &Options) {
        self.gestures = options.gestures.clone();
        self.wheel_zoom_step = options.camera.wheel_zoom_step;
    }

    /// Current cursor position in physical pixels.
    #[must_use]
    pub fn mouse_pos(&self) -> (f32, f32) {
        (self.mouse.mouse_pos.x, self.mouse.mouse_pos.y)
    }

    /// Whether the primary mouse button is pressed.
    #[must_use]
    pub fn mouse_pressed(&self) -> bool {
        self.left_pressed
    }

    /// Whether the shift modifier is held.
    #[must_use]
    pub fn shift_pressed(&self) -> bool {
        self.shift_pressed
    }

    /// Number of fingers currently on the screen.
    #[must_use]
    pub fn active_touches(&self) -> usize {
        self.touches.active_count()
    }

    /// Process a raw input event and return the gestures it produced
    /// (usually zero or one; a two-finger move can yield a pinch and a pan).
    pub fn handle_event(&mut self, event: InputEvent) -> Vec<GestureCommand> {
        self.handle_event_at(event, Instant::now())
    }

    pub(crate) fn handle_event_at(
        &mut self,
        event: InputEvent,
        now: Instant,
    ) -> Vec<GestureCommand> {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.handle_cursor_moved(x, y).into_iter().collect()
            }
            InputEvent::MouseButton { button, pressed } => self
                .handle_mouse_button(button, pressed, now)
                .into_iter()
                .collect(),
            InputEvent::Scroll { delta } => {
                if delta == 0.0 || !delta.is_finite() {
                    return Vec::new();
                }
                vec![GestureCommand::Scale {
                    factor: (delta * self.wheel_zoom_step).exp(),
                }]
            }
            InputEvent::ModifiersChanged { shift } => {
                self.shift_pressed = shift;
                Vec::new()
            }
            InputEvent::Touch { id, phase, x, y } => self.touches.handle(
                id,
                phase,
                Vec2::new(x, y),
                now,
                &self.gestures,
            ),
        }
    }

    /// Cursor moved — compute delta, possibly produce a drag gesture.
    fn handle_cursor_moved(&mut self, x: f32, y: f32) -> Option<GestureCommand> {
        let mut delta = self.mouse.handle_mouse_position(x, y);
        if !(self.left_pressed || self.right_pressed) || delta == Vec2::ZERO {
            return None;
        }
        if self.left_pressed {
            // Jitter inside the slop is still a click
            delta = self.mouse.drag_delta(delta, self.gestures.tap_slop)?;
        }

        if self.right_pressed || self.shift_pressed {
            return Some(GestureCommand::Translate { delta });
        }
        Some(GestureCommand::Rotate {
            delta,
            position: self.mouse.mouse_pos,
        })
    }

    /// Mouse button press/release — track state, detect double-clicks.
    fn handle_mouse_button(
        &mut self,
        button: MouseButton,
        pressed: bool,
        now: Instant,
    ) -> Option<GestureCommand> {
        match button {
            MouseButton::Right => {
                self.right_pressed = pressed;
                None
            }
            MouseButton::Middle => None,
            MouseButton::Left if pressed => {
                self.mouse.handle_mouse_down();
                self.left_pressed = true;
                None
            }
            MouseButton::Left => {
                self.left_pressed = false;
                match self.mouse.process_mouse_up(now, &self.gestures) {
                    ClickResult::DoubleClick => Some(GestureCommand::ResetPose),
                    ClickResult::SingleClick | ClickResult::NoAction => None,
                }
            }
        }
    }
}

impl Default for InputProcessor {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;
    use crate::input::TouchPhase;

    fn press(p: &mut InputProcessor, button: MouseButton, now: Instant) -> Vec<GestureCommand> {
        p.handle_event_at(
            InputEvent::MouseButton {
                button,
                pressed: true,
            },
            now,
        )
    }

    fn release(p: &mut InputProcessor, button: MouseButton, now: Instant) -> Vec<GestureCommand> {
        p.handle_event_at(
            InputEvent::MouseButton {
                button,
                pressed: false,
            },
            now,
        )
    }

    fn move_to(p: &mut InputProcessor, x: f32, y: f32) -> Vec<GestureCommand> {
        p.handle_event(InputEvent::CursorMoved { x, y })
    }

    #[test]
    fn hovering_produces_nothing() {
        let mut p = InputProcessor::default();
        assert!(move_to(&mut p, 10.0, 10.0).is_empty());
        assert!(move_to(&mut p, 50.0, 20.0).is_empty());
    }

    #[test]
    fn left_drag_rotates() {
        let mut p = InputProcessor::default();
        let now = Instant::now();
        let _ = move_to(&mut p, 100.0, 100.0);
        let _ = press(&mut p, MouseButton::Left, now);
        assert_eq!(
            move_to(&mut p, 120.0, 95.0),
            vec![GestureCommand::Rotate {
                delta: Vec2::new(20.0, -5.0),
                position: Vec2::new(120.0, 95.0),
            }]
        );
        assert!(release(&mut p, MouseButton::Left, now).is_empty());
        assert!(!p.mouse_pressed());
    }

    #[test]
    fn shift_or_right_drag_translates() {
        let mut p = InputProcessor::default();
        let now = Instant::now();
        let _ = move_to(&mut p, 100.0, 100.0);

        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: true });
        let _ = press(&mut p, MouseButton::Left, now);
        assert_eq!(
            move_to(&mut p, 115.0, 100.0),
            vec![GestureCommand::Translate {
                delta: Vec2::new(15.0, 0.0)
            }]
        );
        let _ = release(&mut p, MouseButton::Left, now);
        let _ = p.handle_event(InputEvent::ModifiersChanged { shift: false });

        let _ = press(&mut p, MouseButton::Right, now);
        assert_eq!(
            move_to(&mut p, 115.0, 130.0),
            vec![GestureCommand::Translate {
                delta: Vec2::new(0.0, 30.0)
            }]
        );
    }

    #[test]
    fn wheel_scales_exponentially() {
        let mut p = InputProcessor::default();
        let up = p.handle_event(InputEvent::Scroll { delta: 2.0 });
        let down = p.handle_event(InputEvent::Scroll { delta: -2.0 });
        match (up.as_slice(), down.as_slice()) {
            (
                [GestureCommand::Scale { factor: a }],
                [GestureCommand::Scale { factor: b }],
            ) => {
                assert!(*a > 1.0);
                assert!((a * b - 1.0).abs() < 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(p.handle_event(InputEvent::Scroll { delta: 0.0 }).is_empty());
    }

    #[test]
    fn jitter_inside_slop_stays_a_click() {
        let mut p = InputProcessor::default();
        let t0 = Instant::now();
        let _ = move_to(&mut p, 200.0, 200.0);
        let _ = press(&mut p, MouseButton::Left, t0);
        assert!(move_to(&mut p, 203.0, 198.0).is_empty());
        assert!(move_to(&mut p, 201.0, 204.0).is_empty());
        assert!(release(&mut p, MouseButton::Left, t0).is_empty());

        let t1 = t0 + Duration::from_millis(100);
        let _ = press(&mut p, MouseButton::Left, t1);
        assert!(move_to(&mut p, 198.0, 203.0).is_empty());
        assert_eq!(
            release(&mut p, MouseButton::Left, t1),
            vec![GestureCommand::ResetPose]
        );
    }

    #[test]
    fn double_click_resets() {
        let mut p = InputProcessor::default();
        let t0 = Instant::now();
        let _ = move_to(&mut p, 200.0, 200.0);
        let _ = press(&mut p, MouseButton::Left, t0);
        assert!(release(&mut p, MouseButton::Left, t0).is_empty());
        let t1 = t0 + Duration::from_millis(150);
        let _ = press(&mut p, MouseButton::Left, t1);
        assert_eq!(
            release(&mut p, MouseButton::Left, t1),
            vec![GestureCommand::ResetPose]
        );
    }

    #[test]
    fn touch_events_route_to_tracker() {
        let mut p = InputProcessor::default();
        let touch = |id, phase, x, y| InputEvent::Touch { id, phase, x, y };
        let _ = p.handle_event(touch(7, TouchPhase::Started, 50.0, 50.0));
        assert_eq!(p.active_touches(), 1);
        let cmds = p.handle_event(touch(7, TouchPhase::Moved, 90.0, 50.0));
        assert_eq!(cmds.len(), 1);
        let _ = p.handle_event(touch(7, TouchPhase::Ended, 90.0, 50.0));
        assert_eq!(p.active_touches(), 0);
    }
}
