use glam::Vec2;
use web_time::Instant;

use crate::options::GestureOptions;

/// Result of processing a mouse-up event through the click state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickResult {
    /// Drag release or stray button-up.
    NoAction,
    /// First click of a potential double-click.
    SingleClick,
    /// Second click inside the double-click window.
    DoubleClick,
}

/// Tracks mouse position, drag state, and the double-click state machine.
pub(crate) struct MouseState {
    pub(crate) mouse_pos: Vec2,
    press_pos: Option<Vec2>,
    is_dragging: bool,
    last_click: Option<(Instant, Vec2)>,
}

impl MouseState {
    /// Create a new state with no active click.
    pub(crate) fn new() -> Self {
        Self {
            mouse_pos: Vec2::ZERO,
            press_pos: None,
            is_dragging: false,
            last_click: None,
        }
    }

    /// Update cursor position and return the movement since the last call.
    pub(crate) fn handle_mouse_position(&mut self, x: f32, y: f32) -> Vec2 {
        let pos = Vec2::new(x, y);
        let delta = pos - self.mouse_pos;
        self.mouse_pos = pos;
        delta
    }

    /// Record where the primary button went down.
    pub(crate) fn handle_mouse_down(&mut self) {
        self.press_pos = Some(self.mouse_pos);
        self.is_dragging = false;
    }

    /// Mark a drag once the cursor has left the tap slop around the press
    /// position. Returns whether the press is now a drag.
    pub(crate) fn update_dragging(&mut self, tap_slop: f32) -> bool {
        if let Some(press) = self.press_pos {
            if press.distance(self.mouse_pos) > tap_slop {
                self.is_dragging = true;
            }
        }
        self.is_dragging
    }

    /// Movement to apply for a primary-button drag. `None` while the cursor
    /// is still inside the tap slop; the first step out of it carries the
    /// whole distance since the press.
    pub(crate) fn drag_delta(
        &mut self,
        delta: Vec2,
        tap_slop: f32,
    ) -> Option<Vec2> {
        let was_dragging = self.is_dragging;
        if !self.update_dragging(tap_slop) {
            return None;
        }
        match self.press_pos {
            Some(press) if !was_dragging => Some(self.mouse_pos - press),
            _ => Some(delta),
        }
    }

    /// Process a primary-button release and classify the click.
    pub(crate) fn process_mouse_up(
        &mut self,
        now: Instant,
        options: &GestureOptions,
    ) -> ClickResult {
        let was_pressed = self.press_pos.take().is_some();
        let was_dragging = std::mem::replace(&mut self.is_dragging, false);

        if !was_pressed || was_dragging {
            self.last_click = None;
            return ClickResult::NoAction;
        }

        let pos = self.mouse_pos;
        let is_double = self.last_click.is_some_and(|(time, last_pos)| {
            now.duration_since(time) <= options.double_tap_window()
                && last_pos.distance(pos) <= options.double_tap_slop
        });

        if is_double {
            self.last_click = None;
            ClickResult::DoubleClick
        } else {
            self.last_click = Some((now, pos));
            ClickResult::SingleClick
        }
    }
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    fn click(state: &mut MouseState, now: Instant) -> ClickResult {
        state.handle_mouse_down();
        state.process_mouse_up(now, &GestureOptions::default())
    }

    #[test]
    fn two_quick_clicks_make_a_double_click() {
        let mut state = MouseState::new();
        let t0 = Instant::now();
        assert_eq!(click(&mut state, t0), ClickResult::SingleClick);
        assert_eq!(
            click(&mut state, t0 + Duration::from_millis(120)),
            ClickResult::DoubleClick
        );
        // A third click starts over
        assert_eq!(
            click(&mut state, t0 + Duration::from_millis(200)),
            ClickResult::SingleClick
        );
    }

    #[test]
    fn slow_clicks_stay_single() {
        let mut state = MouseState::new();
        let t0 = Instant::now();
        assert_eq!(click(&mut state, t0), ClickResult::SingleClick);
        assert_eq!(
            click(&mut state, t0 + Duration::from_millis(900)),
            ClickResult::SingleClick
        );
    }

    #[test]
    fn drag_release_is_not_a_click() {
        let mut state = MouseState::new();
        let t0 = Instant::now();
        let _ = state.handle_mouse_position(10.0, 10.0);
        state.handle_mouse_down();
        let _ = state.handle_mouse_position(80.0, 10.0);
        assert!(state.update_dragging(10.0));
        assert_eq!(
            state.process_mouse_up(t0, &GestureOptions::default()),
            ClickResult::NoAction
        );
    }

    #[test]
    fn drag_starts_outside_slop_with_full_distance() {
        let mut state = MouseState::new();
        let _ = state.handle_mouse_position(50.0, 50.0);
        state.handle_mouse_down();

        let d = state.handle_mouse_position(54.0, 53.0);
        assert_eq!(state.drag_delta(d, 10.0), None);

        let d = state.handle_mouse_position(62.0, 50.0);
        assert_eq!(state.drag_delta(d, 10.0), Some(Vec2::new(12.0, 0.0)));

        let d = state.handle_mouse_position(60.0, 50.0);
        assert_eq!(state.drag_delta(d, 10.0), Some(Vec2::new(-2.0, 0.0)));
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut state = MouseState::new();
        assert_eq!(
            state.process_mouse_up(Instant::now(), &GestureOptions::default()),
            ClickResult::NoAction
        );
    }
}
