//! Render style of a placed text. Style never takes part in hit-testing
//! except through the measured bounding box.

use bevy::math::Vec2;
use bevy::prelude::Color;
use serde::{Deserialize, Serialize};

/// Default text color for new entries
pub const DEFAULT_TEXT_COLOR: Color = Color::BLACK;

/// Default drop shadow angle in degrees
pub const DEFAULT_SHADOW_ANGLE: f32 = 45.0;

/// Default drop shadow distance as a fraction of the text size
pub const DEFAULT_SHADOW_DISTANCE: f32 = 0.02;

/// Half-transparent black
pub const DEFAULT_SHADOW_COLOR: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);

/// Font family reference. Renderers map these onto their own font families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontChoice {
    #[default]
    Proportional,
    Monospace,
}

impl FontChoice {
    pub const ALL: [FontChoice; 2] = [FontChoice::Proportional, FontChoice::Monospace];

    pub fn label(&self) -> &'static str {
        match self {
            FontChoice::Proportional => "Proportional",
            FontChoice::Monospace => "Monospace",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    /// Offset in local (unscaled) glyph space
    pub offset: Vec2,
    pub color: Color,
}

impl DropShadow {
    /// Shadow cast at `angle_degrees`, `distance` times the text size away from the glyphs
    pub fn at_angle(text_size: f32, angle_degrees: f32, distance: f32, color: Color) -> Self {
        let angle = angle_degrees.to_radians();
        Self {
            offset: Vec2::new(
                text_size * angle.cos() * distance,
                text_size * angle.sin() * distance,
            ),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    /// Base (unscaled) text size in pixels
    pub size: f32,
    pub font: FontChoice,
    pub shadow: Option<DropShadow>,
}

impl TextStyle {
    pub fn with_size(size: f32) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            color: DEFAULT_TEXT_COLOR,
            size: crate::constants::DEFAULT_INITIAL_TEXT_SIZE,
            font: FontChoice::default(),
            shadow: None,
        }
    }
}
