//! Listener output shown to the user: the texts summary, the "tapped" toast
//! and the config reset dialog.

use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};

use crate::config::ConfigResetNotification;
use crate::constants::TAP_TOAST_SECS;
use crate::theme;
use crate::view::{TextTapped, TextsChanged};

/// One line per text, refreshed on every change notification
#[derive(Resource, Default)]
pub struct TextsSummary {
    pub lines: Vec<String>,
}

#[derive(Resource, Default)]
pub struct TapToast {
    pub message: Option<String>,
    pub remaining_secs: f32,
}

impl TapToast {
    pub fn show(&mut self, message: String) {
        self.message = Some(message);
        self.remaining_secs = TAP_TOAST_SECS;
    }

    pub fn tick(&mut self, delta_secs: f32) {
        if self.message.is_none() {
            return;
        }
        self.remaining_secs -= delta_secs;
        if self.remaining_secs <= 0.0 {
            self.message = None;
        }
    }
}

pub fn collect_overlay_messages(
    mut changed: MessageReader<TextsChanged>,
    mut tapped: MessageReader<TextTapped>,
    mut summary: ResMut<TextsSummary>,
    mut toast: ResMut<TapToast>,
) {
    if let Some(latest) = changed.read().last() {
        summary.lines = latest.texts.iter().map(ToString::to_string).collect();
    }
    for event in tapped.read() {
        toast.show(format!("Tapped {}", event.text.content));
    }
}

pub fn tap_toast_ui(
    mut contexts: EguiContexts,
    time: Res<Time>,
    mut toast: ResMut<TapToast>,
) -> Result {
    toast.tick(time.delta_secs());
    let Some(message) = toast.message.clone() else {
        return Ok(());
    };

    egui::Area::new(egui::Id::new("tap_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .interactable(false)
        .show(contexts.ctx_mut()?, |ui| {
            egui::Frame::NONE
                .fill(theme::ui::TOAST_BACKGROUND)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(14, 8))
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
                });
        });

    Ok(())
}

pub fn config_reset_notification_ui(
    mut contexts: EguiContexts,
    mut notification: ResMut<ConfigResetNotification>,
) -> Result {
    if !notification.show {
        return Ok(());
    }

    let mut dismissed = false;
    egui::Window::new("Configuration Reset")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(contexts.ctx_mut()?, |ui| {
            ui.label("Your settings could not be loaded and were reset to defaults.");
            if let Some(reason) = &notification.reason {
                ui.add_space(4.0);
                ui.label(egui::RichText::new(reason).color(theme::ui::ERROR_TEXT));
            }
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        notification.show = false;
        notification.reason = None;
    }

    Ok(())
}
