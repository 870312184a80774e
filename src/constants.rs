//! Centralized constants used across the crate.
//!
//! Default sizes are in logical pixels; times are in seconds.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Text size given to newly added texts when none is configured
pub const DEFAULT_INITIAL_TEXT_SIZE: f32 = 24.0;

/// Smallest size a scale gesture may shrink a text to
pub const DEFAULT_MIN_TEXT_SIZE: f32 = 12.0;

/// Largest size a scale gesture may grow a text to
pub const DEFAULT_MAX_TEXT_SIZE: f32 = 144.0;

/// Height of the strip reserved for the delete button at the bottom of the view
pub const DEFAULT_DELETE_AREA_HEIGHT: f32 = 96.0;

/// Edge length of the delete button at rest
pub const DEFAULT_DELETE_BUTTON_HEIGHT: f32 = 48.0;

/// Delete button scale while a dragged text hovers over it
pub const DELETE_BUTTON_HOVER_SCALE: f32 = 1.5;

/// Duration of one delete button scale ease
pub const DELETE_BUTTON_ANIMATION_SECS: f32 = 0.2;

/// Distance the focal point must travel before a press becomes a move
pub const TOUCH_SLOP: f32 = 8.0;

/// Longest press that still counts as a tap
pub const TAP_TIMEOUT_SECS: f64 = 0.5;

/// Window after a tap during which a second press makes it a double tap
pub const DOUBLE_TAP_TIMEOUT_SECS: f64 = 0.3;

/// Scale applied per mouse wheel line
pub const WHEEL_SCALE_STEP: f32 = 1.1;

/// Rotation applied per mouse wheel line while Shift is held, in degrees
pub const WHEEL_ROTATION_STEP: f32 = 5.0;

/// Pointer id used for the mouse, distinct from any touch id
pub const MOUSE_POINTER_ID: u64 = u64::MAX;

/// How long a "tapped" toast stays on screen in the demo host
pub const TAP_TOAST_SECS: f32 = 2.0;
