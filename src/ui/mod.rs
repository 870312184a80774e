//! Demo host: a controls panel around the overlay view.

mod image_loader;
mod notifications;
mod side_panel;

pub use image_loader::ImageLoaderState;
pub use notifications::{TapToast, TextsSummary};
pub use side_panel::{PanelState, add_stamped_text};

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::view::OverlaySystems;

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PanelState>()
            .init_resource::<ImageLoaderState>()
            .init_resource::<TextsSummary>()
            .init_resource::<TapToast>()
            .add_systems(
                Startup,
                (spawn_camera, image_loader::restore_last_image),
            )
            .add_systems(
                Update,
                (
                    side_panel::seed_initial_caption,
                    notifications::collect_overlay_messages,
                )
                    .after(OverlaySystems::Input),
            )
            // The side panel must claim its space before the overlay fills the rest
            .add_systems(
                EguiPrimaryContextPass,
                (
                    image_loader::poll_image_tasks,
                    side_panel::controls_panel_ui,
                )
                    .chain()
                    .before(OverlaySystems::Render),
            )
            .add_systems(
                EguiPrimaryContextPass,
                (
                    notifications::tap_toast_ui,
                    notifications::config_reset_notification_ui,
                )
                    .after(OverlaySystems::Render),
            );
    }
}
