//! Multi-pointer gesture recognition.
//!
//! [`GestureRecognizer`] turns a stream of raw [`PointerEvent`]s (touches or a
//! mouse, in view coordinates) into the [`GestureEvent`]s the overlay reacts to.
//! It is a pure state machine: time comes in through the events and through
//! [`GestureRecognizer::tick`], so it can be driven from tests.

mod recognizer;


use bevy::math::Vec2;

pub use recognizer::GestureRecognizer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Pressed,
    Moved,
    Released,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub id: u64,
    pub phase: PointerPhase,
    pub position: Vec2,
    /// Seconds on any monotonic clock
    pub time: f64,
}

impl PointerEvent {
    pub fn pressed(id: u64, position: Vec2, time: f64) -> Self {
        Self {
            id,
            phase: PointerPhase::Pressed,
            position,
            time,
        }
    }

    pub fn moved(id: u64, position: Vec2, time: f64) -> Self {
        Self {
            id,
            phase: PointerPhase::Moved,
            position,
            time,
        }
    }

    pub fn released(id: u64, position: Vec2, time: f64) -> Self {
        Self {
            id,
            phase: PointerPhase::Released,
            position,
            time,
        }
    }

    pub fn cancelled(id: u64, position: Vec2, time: f64) -> Self {
        Self {
            id,
            phase: PointerPhase::Cancelled,
            position,
            time,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// First pointer went down
    Down { position: Vec2 },
    /// The focal point left the touch slop
    MoveBegin,
    /// Previous focal point minus current focal point
    Move { distance: Vec2 },
    /// Last pointer lifted after a move
    MoveEnd,
    /// Ratio of the current pointer span to the previous one
    Scale { factor: f32 },
    /// Previous pointer angle minus current pointer angle, in degrees
    Rotate { degrees_since_last: f32 },
    /// A single tap that was not followed by a second one
    SingleTapConfirmed { position: Vec2 },
}
