//! Multi-touch gesture recognizer.
//!
//! One finger drags rotate, two fingers pinch and pan, and two quick taps
//! reset. Once a second finger has touched down, the contact sequence stays
//! a two-finger gesture until every finger has lifted.

use glam::Vec2;
use rustc_hash::FxHashMap;
use web_time::Instant;

use super::event::TouchPhase;
use crate::engine::command::GestureCommand;
use crate::options::GestureOptions;

/// Finger spreads shorter than this cannot produce a pinch ratio.
const MIN_PINCH_SPREAD: f32 = 1.0;

/// A single-finger contact that may still turn out to be a tap.
#[derive(Debug, Clone, Copy)]
struct TapCandidate {
    id: u64,
    start_pos: Vec2,
    start_time: Instant,
    moved: bool,
}

/// Tracks active touches and emits gestures as they move.
#[derive(Default)]
pub(crate) struct TouchTracker {
    active: FxHashMap<u64, Vec2>,
    candidate: Option<TapCandidate>,
    multi_touch: bool,
    last_tap: Option<(Instant, Vec2)>,
}

impl TouchTracker {
    /// Feed one touch event and collect the gestures it completes.
    pub(crate) fn handle(
        &mut self,
        id: u64,
        phase: TouchPhase,
        pos: Vec2,
        now: Instant,
        options: &GestureOptions,
    ) -> Vec<GestureCommand> {
        match phase {
            TouchPhase::Started => {
                self.touch_started(id, pos, now);
                Vec::new()
            }
            TouchPhase::Moved => self.touch_moved(id, pos, options),
            TouchPhase::Ended => self.touch_ended(id, pos, now, options),
            TouchPhase::Cancelled => {
                let _ = self.active.remove(&id);
                self.candidate = None;
                self.finish_sequence_if_idle();
                Vec::new()
            }
        }
    }

    /// Number of fingers currently down.
    pub(crate) fn active_count(&self) -> usize {
        self.active.len()
    }

    fn touch_started(&mut self, id: u64, pos: Vec2, now: Instant) {
        let _ = self.active.insert(id, pos);
        if self.active.len() == 1 && !self.multi_touch {
            self.candidate = Some(TapCandidate {
                id,
                start_pos: pos,
                start_time: now,
                moved: false,
            });
        } else {
            self.multi_touch = true;
            self.candidate = None;
            self.last_tap = None;
        }
    }

    fn touch_moved(
        &mut self,
        id: u64,
        pos: Vec2,
        options: &GestureOptions,
    ) -> Vec<GestureCommand> {
        let Some(&previous) = self.active.get(&id) else {
            return Vec::new();
        };

        match self.active.len() {
            1 if !self.multi_touch => self.single_finger_moved(id, previous, pos, options),
            2 => self.two_fingers_moved(id, pos),
            _ => {
                let _ = self.active.insert(id, pos);
                Vec::new()
            }
        }
    }

    fn single_finger_moved(
        &mut self,
        id: u64,
        previous: Vec2,
        pos: Vec2,
        options: &GestureOptions,
    ) -> Vec<GestureCommand> {
        // Stay put until the finger leaves the tap slop
        if let Some(candidate) = self.candidate.as_mut().filter(|c| c.id == id) {
            if !candidate.moved {
                if candidate.start_pos.distance(pos) <= options.tap_slop {
                    return Vec::new();
                }
                candidate.moved = true;
            }
        }

        let _ = self.active.insert(id, pos);
        let delta = pos - previous;
        if delta == Vec2::ZERO {
            return Vec::new();
        }
        vec![GestureCommand::Rotate {
            delta,
            position: pos,
        }]
    }

    fn two_fingers_moved(&mut self, id: u64, pos: Vec2) -> Vec<GestureCommand> {
        let (old_centroid, old_spread) = self.centroid_and_spread();
        let _ = self.active.insert(id, pos);
        let (new_centroid, new_spread) = self.centroid_and_spread();

        let mut commands = Vec::with_capacity(2);
        if old_spread >= MIN_PINCH_SPREAD && new_spread >= MIN_PINCH_SPREAD {
            let factor = new_spread / old_spread;
            if factor != 1.0 {
                commands.push(GestureCommand::Scale { factor });
            }
        }
        let delta = new_centroid - old_centroid;
        if delta != Vec2::ZERO {
            commands.push(GestureCommand::Translate { delta });
        }
        commands
    }

    fn touch_ended(
        &mut self,
        id: u64,
        pos: Vec2,
        now: Instant,
        options: &GestureOptions,
    ) -> Vec<GestureCommand> {
        let was_active = self.active.remove(&id).is_some();
        let candidate = self.candidate.take().filter(|c| c.id == id);
        self.finish_sequence_if_idle();

        let Some(candidate) = candidate.filter(|_| was_active) else {
            return Vec::new();
        };
        let is_tap = !candidate.moved
            && now.duration_since(candidate.start_time)
                <= options.double_tap_window();
        if !is_tap {
            self.last_tap = None;
            return Vec::new();
        }

        let is_double = self.last_tap.is_some_and(|(time, last_pos)| {
            now.duration_since(time) <= options.double_tap_window()
                && last_pos.distance(pos) <= options.double_tap_slop
        });
        if is_double {
            self.last_tap = None;
            vec![GestureCommand::ResetPose]
        } else {
            self.last_tap = Some((now, pos));
            Vec::new()
        }
    }

    fn finish_sequence_if_idle(&mut self) {
        if self.active.is_empty() {
            self.multi_touch = false;
        }
    }

    fn centroid_and_spread(&self) -> (Vec2, f32) {
        let mut points = self.active.values().copied();
        match (points.next(), points.next()) {
            (Some(a), Some(b)) => ((a + b) * 0.5, a.distance(b)),
            (Some(a), None) => (a, 0.0),
            _ => (Vec2::ZERO, 0.0),
        }
    }
}
