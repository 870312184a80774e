//! Pointer stream → gesture events.

use bevy::math::Vec2;

use super::{GestureEvent, PointerEvent, PointerPhase};
use crate::constants::{DOUBLE_TAP_TIMEOUT_SECS, TAP_TIMEOUT_SECS, TOUCH_SLOP};

#[derive(Debug, Clone, Copy, PartialEq)]
struct PendingTap {
    position: Vec2,
    time: f64,
}

/// Tracks active pointers and emits move, scale, rotate and tap gestures.
///
/// The focal point (mean of all active pointers) drives moves; the first two
/// pointers drive scale and rotation. Whenever the pointer count changes the
/// reference focal point, span and angle are re-seeded so nothing jumps.
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    pointers: Vec<(u64, Vec2)>,
    down_focal: Vec2,
    down_time: f64,
    last_focal: Vec2,
    last_span: Option<f32>,
    last_angle: Option<f32>,
    moving: bool,
    left_slop: bool,
    multi_touch: bool,
    pending_tap: Option<PendingTap>,
    /// The current press landed inside the double-tap window of a previous tap
    double_tapping: bool,
    touch_slop: f32,
    tap_timeout: f64,
    double_tap_timeout: f64,
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self {
            pointers: Vec::new(),
            down_focal: Vec2::ZERO,
            down_time: 0.0,
            last_focal: Vec2::ZERO,
            last_span: None,
            last_angle: None,
            moving: false,
            left_slop: false,
            multi_touch: false,
            pending_tap: None,
            double_tapping: false,
            touch_slop: TOUCH_SLOP,
            tap_timeout: TAP_TIMEOUT_SECS,
            double_tap_timeout: DOUBLE_TAP_TIMEOUT_SECS,
        }
    }
}

impl GestureRecognizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn pointer_count(&self) -> usize {
        self.pointers.len()
    }

    /// Whether `id` is currently held down
    pub fn is_tracking(&self, id: u64) -> bool {
        self.pointers.iter().any(|(p, _)| *p == id)
    }

    /// Feed one pointer event and collect the gestures it completes
    pub fn process(&mut self, event: PointerEvent) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        match event.phase {
            PointerPhase::Pressed => self.on_pressed(event, &mut out),
            PointerPhase::Moved => self.on_moved(event, &mut out),
            PointerPhase::Released | PointerPhase::Cancelled => self.on_lifted(event, &mut out),
        }
        out
    }

    /// Confirm a pending single tap once the double-tap window has passed
    pub fn tick(&mut self, now: f64) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        if !self.pointers.is_empty() {
            return out;
        }
        if let Some(tap) = self.pending_tap
            && now - tap.time >= self.double_tap_timeout
        {
            self.pending_tap = None;
            out.push(GestureEvent::SingleTapConfirmed {
                position: tap.position,
            });
        }
        out
    }

    /// Drop every pointer, ending any move in progress
    pub fn reset(&mut self) -> Vec<GestureEvent> {
        let mut out = Vec::new();
        if self.moving {
            out.push(GestureEvent::MoveEnd);
        }
        *self = Self {
            touch_slop: self.touch_slop,
            tap_timeout: self.tap_timeout,
            double_tap_timeout: self.double_tap_timeout,
            ..Default::default()
        };
        out
    }

    fn on_pressed(&mut self, event: PointerEvent, out: &mut Vec<GestureEvent>) {
        if let Some(slot) = self.pointers.iter_mut().find(|(id, _)| *id == event.id) {
            slot.1 = event.position;
            return;
        }

        if self.pointers.is_empty() {
            self.double_tapping = false;
            if let Some(tap) = self.pending_tap.take() {
                if event.time - tap.time >= self.double_tap_timeout {
                    // The frame tick missed the window; confirm late rather than never
                    out.push(GestureEvent::SingleTapConfirmed {
                        position: tap.position,
                    });
                } else {
                    self.double_tapping = true;
                }
            }
            self.down_time = event.time;
            self.moving = false;
            self.left_slop = false;
            self.multi_touch = false;
            out.push(GestureEvent::Down {
                position: event.position,
            });
        }

        self.pointers.push((event.id, event.position));
        if self.pointers.len() > 1 {
            self.multi_touch = true;
        }
        self.reseed();
    }

    fn on_moved(&mut self, event: PointerEvent, out: &mut Vec<GestureEvent>) {
        let Some(slot) = self.pointers.iter_mut().find(|(id, _)| *id == event.id) else {
            return;
        };
        slot.1 = event.position;

        let focal = self.focal();
        if !self.moving && focal.distance(self.down_focal) > self.touch_slop {
            self.moving = true;
            self.left_slop = true;
            out.push(GestureEvent::MoveBegin);
        }

        if self.moving {
            let distance = self.last_focal - focal;
            if distance != Vec2::ZERO {
                out.push(GestureEvent::Move { distance });
            }
            self.last_focal = focal;
        }

        if let Some((span, angle)) = self.span_and_angle() {
            if let Some(last_span) = self.last_span
                && last_span > 0.0
                && span > 0.0
                && span != last_span
            {
                out.push(GestureEvent::Scale {
                    factor: span / last_span,
                });
            }
            if let Some(last_angle) = self.last_angle {
                let delta = wrap_degrees(last_angle - angle);
                if delta != 0.0 {
                    out.push(GestureEvent::Rotate {
                        degrees_since_last: delta,
                    });
                }
            }
            self.last_span = Some(span);
            self.last_angle = Some(angle);
        }
    }

    fn on_lifted(&mut self, event: PointerEvent, out: &mut Vec<GestureEvent>) {
        let Some(index) = self.pointers.iter().position(|(id, _)| *id == event.id) else {
            return;
        };
        self.pointers.remove(index);

        if !self.pointers.is_empty() {
            self.reseed();
            return;
        }

        self.last_span = None;
        self.last_angle = None;

        if self.moving {
            self.moving = false;
            out.push(GestureEvent::MoveEnd);
        } else if event.phase == PointerPhase::Released
            && !self.left_slop
            && !self.multi_touch
            && !self.double_tapping
            && event.time - self.down_time <= self.tap_timeout
        {
            self.pending_tap = Some(PendingTap {
                position: event.position,
                time: event.time,
            });
        }
    }

    fn focal(&self) -> Vec2 {
        if self.pointers.is_empty() {
            return Vec2::ZERO;
        }
        let sum: Vec2 = self.pointers.iter().map(|(_, p)| *p).sum();
        sum / self.pointers.len() as f32
    }

    /// Distance and angle (degrees, y-down) from the first pointer to the second
    fn span_and_angle(&self) -> Option<(f32, f32)> {
        let [(_, a), (_, b), ..] = self.pointers.as_slice() else {
            return None;
        };
        let d = *b - *a;
        Some((d.length(), d.y.atan2(d.x).to_degrees()))
    }

    fn reseed(&mut self) {
        let focal = self.focal();
        self.last_focal = focal;
        if !self.moving {
            self.down_focal = focal;
        }
        match self.span_and_angle() {
            Some((span, angle)) => {
                self.last_span = Some(span);
                self.last_angle = Some(angle);
            }
            None => {
                self.last_span = None;
                self.last_angle = None;
            }
        }
    }
}

/// Wrap an angle difference into `[-180, 180)`
fn wrap_degrees(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}
