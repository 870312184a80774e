//! Delete affordance: a button centered in a strip at the bottom of the view,
//! plus the cosmetic scale animation played while a text is dragged over it.

use bevy::math::Vec2;

use crate::constants::{DELETE_BUTTON_ANIMATION_SECS, DELETE_BUTTON_HOVER_SCALE};
use crate::geometry::BoundingBox;

/// Geometry of the delete strip, in view pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeleteZone {
    /// Height of the strip reserved at the bottom of the view
    pub area_height: f32,
    /// Unscaled edge length of the square delete button
    pub button_height: f32,
}

impl DeleteZone {
    pub fn new(area_height: f32, button_height: f32) -> Self {
        Self {
            area_height,
            button_height,
        }
    }

    /// Button edge length at the given animation scale, rounded to whole pixels
    pub fn button_size(&self, button_scale: f32) -> f32 {
        (self.button_height * button_scale).round()
    }

    /// Rectangle of the delete button for a view of `view_size`
    pub fn button_rect(&self, view_size: Vec2, button_scale: f32) -> BoundingBox {
        let size = self.button_size(button_scale);
        let (w, h) = (view_size.x, view_size.y);
        let inset = (self.area_height - size) / 2.0;
        BoundingBox::new(
            (w - size) / 2.0,
            h - self.area_height + inset,
            (w + size) / 2.0,
            h - inset,
        )
    }
}

/// Linear ease of the delete button scale toward a target value.
#[derive(Debug, Clone, PartialEq)]
pub struct DeleteButtonAnimator {
    value: f32,
    from: f32,
    to: f32,
    elapsed: f32,
    duration: f32,
    running: bool,
}

impl Default for DeleteButtonAnimator {
    fn default() -> Self {
        Self {
            value: 1.0,
            from: 1.0,
            to: 1.0,
            elapsed: 0.0,
            duration: DELETE_BUTTON_ANIMATION_SECS,
            running: false,
        }
    }
}

impl DeleteButtonAnimator {
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Target scale while the dragged text does or does not overlap the zone
    pub fn target_for(hovering: bool) -> f32 {
        if hovering {
            DELETE_BUTTON_HOVER_SCALE
        } else {
            1.0
        }
    }

    /// Start easing from the current value toward `target`. Re-targeting to the
    /// value already being approached keeps the running animation.
    pub fn animate_to(&mut self, target: f32) {
        if self.running && self.to == target {
            return;
        }
        if !self.running && self.value == target {
            return;
        }
        self.from = self.value;
        self.to = target;
        self.elapsed = 0.0;
        self.running = true;
    }

    /// Advance by `delta_secs`. Returns true when the value changed.
    pub fn tick(&mut self, delta_secs: f32) -> bool {
        if !self.running {
            return false;
        }

        self.elapsed += delta_secs;
        let t = if self.duration > 0.0 {
            (self.elapsed / self.duration).min(1.0)
        } else {
            1.0
        };
        self.value = self.from + (self.to - self.from) * t;
        if t >= 1.0 {
            self.running = false;
        }
        true
    }

    /// Stop and snap to `value`
    pub fn reset(&mut self, value: f32) {
        self.running = false;
        self.value = value;
        self.from = value;
        self.to = value;
        self.elapsed = 0.0;
    }
}
