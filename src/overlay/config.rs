//! Construction-time attributes of the overlay.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DELETE_AREA_HEIGHT, DEFAULT_DELETE_BUTTON_HEIGHT, DEFAULT_INITIAL_TEXT_SIZE,
    DEFAULT_MAX_TEXT_SIZE, DEFAULT_MIN_TEXT_SIZE,
};

/// How far a dragged text may leave the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClampMode {
    /// No limit
    #[default]
    Unlimited,
    /// The top-left corner of the text's enclosing box stays on the image
    OriginInside,
    /// The whole enclosing box stays on the image
    TextInside,
}

impl ClampMode {
    pub const ALL: [ClampMode; 3] = [
        ClampMode::Unlimited,
        ClampMode::OriginInside,
        ClampMode::TextInside,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ClampMode::Unlimited => "Anywhere",
            ClampMode::OriginInside => "Corner on image",
            ClampMode::TextInside => "Whole text on image",
        }
    }
}

/// Gesture switches and size limits, read once when the overlay is built.
/// Every field falls back to its default when missing from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    pub pan_enabled: bool,
    pub scale_enabled: bool,
    pub rotation_enabled: bool,
    /// Drag-to-delete; reserves a strip at the bottom of the view
    pub delete_enabled: bool,
    pub initial_text_size: f32,
    pub min_text_size: f32,
    pub max_text_size: f32,
    pub delete_area_height: f32,
    pub delete_button_height: f32,
    pub clamp_mode: ClampMode,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            pan_enabled: false,
            scale_enabled: false,
            rotation_enabled: false,
            delete_enabled: false,
            initial_text_size: DEFAULT_INITIAL_TEXT_SIZE,
            min_text_size: DEFAULT_MIN_TEXT_SIZE,
            max_text_size: DEFAULT_MAX_TEXT_SIZE,
            delete_area_height: DEFAULT_DELETE_AREA_HEIGHT,
            delete_button_height: DEFAULT_DELETE_BUTTON_HEIGHT,
            clamp_mode: ClampMode::Unlimited,
        }
    }
}

impl OverlayConfig {
    /// Every gesture enabled, default sizes
    pub fn all_gestures() -> Self {
        Self {
            pan_enabled: true,
            scale_enabled: true,
            rotation_enabled: true,
            delete_enabled: true,
            ..Default::default()
        }
    }
}
