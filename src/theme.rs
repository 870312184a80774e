//! Centralized color theme for the overlay view and the demo host.
//!
//! Modify values here to change the color scheme.

use bevy::prelude::Color;
use bevy_egui::egui;

// ============================================================================
// Overlay View Colors
// ============================================================================

/// Backdrop behind the image, visible where the image does not cover the view
pub const VIEW_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(30, 30, 32);

/// Filled disc behind the trash icon
pub const DELETE_BUTTON_FILL: egui::Color32 = egui::Color32::from_rgba_premultiplied(0, 0, 0, 140);

/// Trash icon strokes
pub const DELETE_BUTTON_ICON: egui::Color32 = egui::Color32::WHITE;

/// Disc tint once the button has grown while a text hovers over it
pub const DELETE_BUTTON_HOVER_FILL: egui::Color32 = egui::Color32::from_rgb(200, 50, 50);

/// Text color palette offered by the demo host
pub fn text_colors() -> [(Color, &'static str); 6] {
    [
        (Color::srgb(1.0, 0.0, 0.0), "Red"),
        (Color::srgb(0.0, 0.0, 1.0), "Blue"),
        (Color::srgb(0.0, 0.8, 0.0), "Green"),
        (Color::srgb(1.0, 1.0, 0.0), "Yellow"),
        (Color::srgb(0.0, 0.0, 0.0), "Black"),
        (Color::srgb(1.0, 1.0, 1.0), "White"),
    ]
}

// ============================================================================
// UI Colors (egui)
// ============================================================================

pub mod ui {
    use bevy_egui::egui;

    /// Grey for help/hint text
    pub const HINT_TEXT: egui::Color32 = egui::Color32::GRAY;

    /// Red for error messages
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::RED;

    /// Dark translucent background of the "tapped" toast
    pub const TOAST_BACKGROUND: egui::Color32 = egui::Color32::from_rgba_premultiplied(20, 20, 20, 220);
}

// ============================================================================
// Color Conversion Utilities
// ============================================================================

/// Convert a Bevy Color to egui Color32 (preserving alpha)
pub fn bevy_to_egui(color: Color) -> egui::Color32 {
    let srgba = color.to_srgba();
    egui::Color32::from_rgba_unmultiplied(
        (srgba.red * 255.0) as u8,
        (srgba.green * 255.0) as u8,
        (srgba.blue * 255.0) as u8,
        (srgba.alpha * 255.0) as u8,
    )
}

/// Convert an egui Color32 to Bevy Color
pub fn egui_to_bevy(color: egui::Color32) -> Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    Color::srgba(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        a as f32 / 255.0,
    )
}
