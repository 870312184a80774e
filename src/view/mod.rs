//! Bevy glue around [`TextOverlay`].
//!
//! The overlay lives in the [`OverlayWidget`] resource. Input systems turn
//! bevy touches, mouse buttons and wheel motion into pointer events for the
//! [`GestureRecognizer`], the render system paints everything with egui inside
//! the central panel, and the overlay callbacks come back out as
//! [`TextsChanged`] / [`TextTapped`] messages.

mod input;
mod layout;
mod painter;

use std::sync::{Arc, Mutex};

use bevy::prelude::*;
use bevy_egui::{EguiPrimaryContextPass, egui};

use crate::geometry::BoundingBox;
use crate::gestures::{GestureEvent, GestureRecognizer};
use crate::overlay::{OverlayConfig, OverlayListener, TextEntry, TextOverlay};

pub use layout::fit_center;
pub use painter::{EguiMeasure, EguiPainter};

/// Ordering handles for systems that touch the overlay
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum OverlaySystems {
    /// Pointer and wheel input plus callback publishing, in `Update`
    Input,
    /// Central panel drawing, in `EguiPrimaryContextPass`. Side panels of the
    /// host must run before this set so the view gets the remaining space.
    Render,
}

/// Every entry, sent after any change to the texts
#[derive(Message, Debug, Clone)]
pub struct TextsChanged {
    pub texts: Vec<TextEntry>,
}

/// A confirmed single tap on the selected text
#[derive(Message, Debug, Clone)]
pub struct TextTapped {
    pub text: TextEntry,
}

/// Callback payloads queued by the overlay listener until the next
/// [`publish_notifications`] run
#[derive(Debug, Clone)]
enum OverlayNotification {
    Changed(Vec<TextEntry>),
    Tapped(TextEntry),
}

type Outbox = Arc<Mutex<Vec<OverlayNotification>>>;

fn forwarding_listener(outbox: &Outbox) -> OverlayListener {
    let changed = Arc::clone(outbox);
    let tapped = Arc::clone(outbox);
    OverlayListener::new()
        .on_texts_changed(move |texts| {
            if let Ok(mut queue) = changed.lock() {
                queue.push(OverlayNotification::Changed(texts.to_vec()));
            }
        })
        .on_text_tapped(move |text| {
            if let Ok(mut queue) = tapped.lock() {
                queue.push(OverlayNotification::Tapped(text.clone()));
            }
        })
}

/// The overlay and the recognizer feeding it
#[derive(Resource)]
pub struct OverlayWidget {
    pub overlay: TextOverlay,
    recognizer: GestureRecognizer,
    outbox: Outbox,
    measure_installed: bool,
}

impl OverlayWidget {
    pub fn new(config: &OverlayConfig) -> Self {
        let outbox = Outbox::default();
        let overlay = TextOverlay::new(config).with_listener(forwarding_listener(&outbox));
        Self {
            overlay,
            recognizer: GestureRecognizer::new(),
            outbox,
            measure_installed: false,
        }
    }

    pub fn recognizer(&self) -> &GestureRecognizer {
        &self.recognizer
    }

    /// Apply recognized gestures to the overlay in order
    pub fn apply_gestures(&mut self, events: Vec<GestureEvent>) {
        for event in events {
            self.overlay.handle_gesture(event);
        }
    }

    fn drain_notifications(&self) -> Vec<OverlayNotification> {
        match self.outbox.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => {
                warn!("Overlay notification queue poisoned, dropping notifications");
                Vec::new()
            }
        }
    }
}

/// Screen rectangle the overlay was last drawn into (egui points, which
/// match bevy logical pixels)
#[derive(Resource, Default, Debug)]
pub struct OverlayViewport {
    pub bounds: Option<BoundingBox>,
    /// The mouse is over the view and no egui window covers it
    pub pointer_inside: bool,
}

impl OverlayViewport {
    /// Convert a window position into view coordinates
    pub fn to_local(&self, window_position: Vec2) -> Option<Vec2> {
        self.bounds.map(|bounds| window_position - bounds.min())
    }

    pub fn contains(&self, window_position: Vec2) -> bool {
        self.bounds.is_some_and(|bounds| bounds.contains(window_position))
    }
}

/// Image drawn underneath the texts
#[derive(Resource, Default)]
pub struct OverlayBackground {
    pub texture: Option<egui::TextureHandle>,
}

/// Forward queued overlay callbacks as bevy messages
fn publish_notifications(
    widget: Res<OverlayWidget>,
    mut changed: MessageWriter<TextsChanged>,
    mut tapped: MessageWriter<TextTapped>,
) {
    for notification in widget.drain_notifications() {
        match notification {
            OverlayNotification::Changed(texts) => {
                changed.write(TextsChanged { texts });
            }
            OverlayNotification::Tapped(text) => {
                tapped.write(TextTapped { text });
            }
        }
    }
}

fn tick_delete_animation(time: Res<Time>, mut widget: ResMut<OverlayWidget>) {
    if widget.overlay.delete_area_visible() {
        widget.overlay.tick_animation(time.delta_secs());
    }
}

pub struct TextOverlayPlugin {
    pub config: OverlayConfig,
}

impl TextOverlayPlugin {
    pub fn new(config: OverlayConfig) -> Self {
        Self { config }
    }
}

impl Plugin for TextOverlayPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(OverlayWidget::new(&self.config))
            .init_resource::<OverlayViewport>()
            .init_resource::<OverlayBackground>()
            .add_message::<TextsChanged>()
            .add_message::<TextTapped>()
            .add_systems(
                Update,
                (
                    input::feed_pointer_input,
                    input::feed_mouse_wheel,
                    tick_delete_animation,
                    publish_notifications,
                )
                    .chain()
                    .in_set(OverlaySystems::Input),
            )
            .add_systems(
                EguiPrimaryContextPass,
                painter::render_overlay.in_set(OverlaySystems::Render),
            );
    }
}
