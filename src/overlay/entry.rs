//! Host-facing snapshot of a placed text.

use std::fmt;

use bevy::math::Vec2;
use bevy::prelude::Color;

use super::style::FontChoice;

/// Read-only projection of one text, with its position normalized to the
/// widget size at the time the snapshot was taken.
#[derive(Debug, Clone, PartialEq)]
pub struct TextEntry {
    pub content: String,
    /// Fraction of the view width/height, `[0, 1]` while the anchor is inside the view
    pub position: Vec2,
    pub scale_factor: f32,
    pub rotation_degrees: f32,
    pub text_color: Color,
    /// Base (unscaled) text size in pixels
    pub text_size: f32,
    pub font: FontChoice,
}

impl TextEntry {
    /// Text size after the scale factor is applied
    pub fn rendered_size(&self) -> f32 {
        self.text_size * self.scale_factor
    }
}

impl fmt::Display for TextEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "\"{}\" at ({:.3}, {:.3}) x{:.2} {:.1}°",
            self.content, self.position.x, self.position.y, self.scale_factor, self.rotation_degrees
        )
    }
}

/// Convert a pixel position into fractions of `view_size`.
///
/// An axis with no measured extent reports `0.0`.
pub fn normalize(position: Vec2, view_size: Vec2) -> Vec2 {
    let axis = |p: f32, extent: f32| if extent > 0.0 { p / extent } else { 0.0 };
    Vec2::new(axis(position.x, view_size.x), axis(position.y, view_size.y))
}

/// Convert a normalized position back into pixels for `view_size`
pub fn denormalize(position: Vec2, view_size: Vec2) -> Vec2 {
    position * view_size
}
