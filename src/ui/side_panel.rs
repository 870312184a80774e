use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use super::image_loader::ImageLoaderState;
use super::notifications::TextsSummary;
use crate::config::{AppConfig, SaveConfigRequest};
use crate::overlay::style::{DEFAULT_SHADOW_ANGLE, DEFAULT_SHADOW_COLOR, DEFAULT_SHADOW_DISTANCE};
use crate::overlay::{ClampMode, FontChoice, Selection, TextOverlay};
use crate::theme::{self, bevy_to_egui, egui_to_bevy};
use crate::view::OverlayWidget;

/// Caption shown until the user types their own
const INITIAL_CAPTION: &str = "Drag me around";

/// Editing state of the controls panel
#[derive(Resource)]
pub struct PanelState {
    /// Caption for "Replace all"
    pub caption: String,
    /// Content of the selected text being edited
    pub edit_buffer: String,
    /// Selection the edit buffer was last filled from
    pub synced_selection: Selection,
    /// Whether the initial caption has been placed
    pub seeded: bool,
}

impl Default for PanelState {
    fn default() -> Self {
        Self {
            caption: INITIAL_CAPTION.to_string(),
            edit_buffer: String::new(),
            synced_selection: Selection::None,
            seeded: false,
        }
    }
}

impl PanelState {
    /// Refill the edit buffer when the selection moved to another text
    fn sync_selection(&mut self, overlay: &TextOverlay) {
        let selection = overlay.selection();
        if selection != self.synced_selection {
            self.edit_buffer = overlay
                .selected()
                .map(|entry| entry.content)
                .unwrap_or_default();
            self.synced_selection = selection;
        }
    }
}

/// Text added by the "Add text" button: time-stamped, red, with a drop shadow
pub fn add_stamped_text(overlay: &mut TextOverlay) {
    let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
    overlay.add_text(format!("Text {}", stamp));
    overlay.set_text_color(Color::srgb(1.0, 0.0, 0.0));
    overlay.add_drop_shadow(DEFAULT_SHADOW_ANGLE, DEFAULT_SHADOW_DISTANCE, DEFAULT_SHADOW_COLOR);
}

/// Place the initial caption once the view has a size
pub fn seed_initial_caption(mut panel: ResMut<PanelState>, mut widget: ResMut<OverlayWidget>) {
    if panel.seeded || widget.overlay.view_size() == Vec2::ZERO {
        return;
    }
    widget.overlay.set_text(panel.caption.clone());
    panel.seeded = true;
}

pub fn controls_panel_ui(
    mut contexts: EguiContexts,
    mut panel: ResMut<PanelState>,
    mut widget: ResMut<OverlayWidget>,
    mut config: ResMut<AppConfig>,
    mut loader: ResMut<ImageLoaderState>,
    summary: Res<TextsSummary>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let overlay = &mut widget.overlay;
    panel.sync_selection(overlay);

    let mut config_changed = false;

    egui::SidePanel::left("controls_panel")
        .default_width(280.0)
        .resizable(true)
        .show(contexts.ctx_mut()?, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Text Overlay");
                ui.add_space(8.0);

                // Image
                ui.group(|ui| {
                    ui.label(egui::RichText::new("Image").strong());
                    ui.horizontal(|ui| {
                        if ui
                            .add_enabled(!loader.is_busy(), egui::Button::new("Open image..."))
                            .clicked()
                        {
                            loader.open_dialog();
                        }
                        if loader.is_busy() {
                            ui.spinner();
                        }
                    });
                    match &loader.current_name {
                        Some(name) => {
                            ui.label(egui::RichText::new(name).weak());
                        }
                        None => {
                            ui.label(egui::RichText::new("No image").weak().italics());
                        }
                    }
                    if let Some(error) = &loader.error {
                        ui.label(egui::RichText::new(error).color(theme::ui::ERROR_TEXT));
                    }
                });

                ui.add_space(8.0);

                // Texts
                ui.group(|ui| {
                    ui.label(egui::RichText::new("Texts").strong());
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut panel.caption);
                        if ui.button("Replace all").clicked() {
                            overlay.set_text(panel.caption.clone());
                        }
                    });
                    if ui.button("Add text").clicked() {
                        add_stamped_text(overlay);
                    }
                });

                ui.add_space(8.0);

                ui.group(|ui| {
                    ui.label(egui::RichText::new("Selected").strong());
                    selected_text_controls(ui, &mut panel, overlay);
                });

                ui.add_space(8.0);

                ui.group(|ui| {
                    ui.label(egui::RichText::new("Gestures").strong());
                    config_changed |= gesture_controls(ui, overlay, &mut config);
                });

                ui.add_space(8.0);

                ui.group(|ui| {
                    ui.label(egui::RichText::new("Placed texts").strong());
                    if summary.lines.is_empty() {
                        ui.label(egui::RichText::new("None").weak().italics());
                    }
                    for line in &summary.lines {
                        ui.label(egui::RichText::new(line).monospace().small());
                    }
                });

                ui.add_space(8.0);
                ui.label(
                    egui::RichText::new(
                        "Drag to move, pinch or scroll to scale, twist or Shift+scroll to rotate.",
                    )
                    .color(theme::ui::HINT_TEXT)
                    .small(),
                );
            });
        });

    if config_changed {
        config.dirty = true;
        save_events.write(SaveConfigRequest);
    }

    Ok(())
}

fn selected_text_controls(ui: &mut egui::Ui, panel: &mut PanelState, overlay: &mut TextOverlay) {
    let Some(entry) = overlay.selected() else {
        ui.label(egui::RichText::new("Tap a text to select it").weak().italics());
        return;
    };
    let has_shadow = overlay
        .selected_properties()
        .is_some_and(|tp| tp.style().shadow.is_some());

    if ui.text_edit_singleline(&mut panel.edit_buffer).changed() {
        overlay.change_text(panel.edit_buffer.clone());
    }

    ui.horizontal(|ui| {
        ui.label("Color:");
        let mut color = bevy_to_egui(entry.text_color);
        if ui.color_edit_button_srgba(&mut color).changed() {
            overlay.set_text_color(egui_to_bevy(color));
        }
        for (preset, name) in theme::text_colors() {
            let swatch = egui::Button::new("")
                .fill(bevy_to_egui(preset))
                .min_size(egui::vec2(16.0, 16.0));
            if ui.add(swatch).on_hover_text(name).clicked() {
                overlay.set_text_color(preset);
            }
        }
    });

    ui.horizontal(|ui| {
        ui.label("Font:");
        egui::ComboBox::from_id_salt("selected_font")
            .selected_text(entry.font.label())
            .show_ui(ui, |ui| {
                for font in FontChoice::ALL {
                    if ui
                        .selectable_label(entry.font == font, font.label())
                        .clicked()
                    {
                        overlay.set_font(font);
                    }
                }
            });
    });

    let mut shadow = has_shadow;
    if ui.checkbox(&mut shadow, "Drop shadow").changed() {
        if shadow {
            overlay.add_drop_shadow(
                DEFAULT_SHADOW_ANGLE,
                DEFAULT_SHADOW_DISTANCE,
                DEFAULT_SHADOW_COLOR,
            );
        } else {
            overlay.clear_drop_shadow();
        }
    }

    let mut position = entry.position;
    let x = ui.add(egui::Slider::new(&mut position.x, 0.0..=1.0).text("x"));
    let y = ui.add(egui::Slider::new(&mut position.y, 0.0..=1.0).text("y"));
    if x.changed() || y.changed() {
        overlay.set_position(position);
    }

    let mut scale = entry.scale_factor;
    if ui
        .add(egui::Slider::new(&mut scale, 0.25..=6.0).text("scale"))
        .changed()
    {
        overlay.set_scale_factor(scale);
    }

    let mut rotation = entry.rotation_degrees;
    if ui
        .add(egui::Slider::new(&mut rotation, -180.0..=180.0).text("rotation").suffix("°"))
        .changed()
    {
        overlay.set_rotation_degrees(rotation);
    }
}

/// Gesture switches. Pan, scale and rotation apply immediately; delete
/// reserves layout space so it only applies on the next start.
fn gesture_controls(ui: &mut egui::Ui, overlay: &mut TextOverlay, config: &mut AppConfig) -> bool {
    let settings = &mut config.data.overlay;
    let mut changed = false;

    if ui.checkbox(&mut overlay.pan_enabled, "Move").changed() {
        settings.pan_enabled = overlay.pan_enabled;
        changed = true;
    }
    if ui.checkbox(&mut overlay.scale_enabled, "Scale").changed() {
        settings.scale_enabled = overlay.scale_enabled;
        changed = true;
    }
    if ui.checkbox(&mut overlay.rotation_enabled, "Rotate").changed() {
        settings.rotation_enabled = overlay.rotation_enabled;
        changed = true;
    }
    egui::ComboBox::from_label("Keep texts")
        .selected_text(overlay.clamp_mode.label())
        .show_ui(ui, |ui| {
            for mode in ClampMode::ALL {
                if ui
                    .selectable_value(&mut overlay.clamp_mode, mode, mode.label())
                    .changed()
                {
                    settings.clamp_mode = mode;
                    changed = true;
                }
            }
        });
    if ui
        .checkbox(&mut settings.delete_enabled, "Drag to delete")
        .changed()
    {
        changed = true;
    }
    if settings.delete_enabled != overlay.delete_enabled() {
        ui.label(
            egui::RichText::new("Restart to apply the delete setting")
                .color(theme::ui::HINT_TEXT)
                .small(),
        );
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::OverlayConfig;

    fn overlay() -> TextOverlay {
        TextOverlay::new(&OverlayConfig::all_gestures()).with_view_size(Vec2::new(640.0, 480.0))
    }

    #[test]
    fn test_stamped_text_is_red_with_shadow() {
        let mut overlay = overlay();
        add_stamped_text(&mut overlay);

        let entry = overlay.selected().unwrap();
        assert!(entry.content.starts_with("Text "));
        assert_eq!(entry.text_color, Color::srgb(1.0, 0.0, 0.0));
        assert!(overlay.selected_properties().unwrap().style().shadow.is_some());
    }

    #[test]
    fn test_sync_selection_fills_buffer_once() {
        let mut overlay = overlay();
        let mut panel = PanelState::default();
        overlay.add_text("first");

        panel.sync_selection(&overlay);
        assert_eq!(panel.edit_buffer, "first");

        panel.edit_buffer.push_str(" edited");
        panel.sync_selection(&overlay);
        assert_eq!(panel.edit_buffer, "first edited");

        overlay.add_text("second");
        panel.sync_selection(&overlay);
        assert_eq!(panel.edit_buffer, "second");
    }
}
