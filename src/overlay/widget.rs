//! The overlay itself: owns the placed texts, the selection and the gesture
//! switches, and turns gestures and host calls into transform updates.

use bevy::log::{debug, info};
use bevy::math::Vec2;
use bevy::prelude::Color;

use super::config::{ClampMode, OverlayConfig};
use super::delete_zone::{DeleteButtonAnimator, DeleteZone};
use super::entry::{TextEntry, denormalize};
use super::listener::OverlayListener;
use super::measure::{ApproxMeasure, TextMeasure};
use super::properties::TextProperties;
use super::render::OverlayPainter;
use super::style::{DropShadow, FontChoice, TextStyle};
use crate::geometry::BoundingBox;
use crate::gestures::GestureEvent;

/// Which placed text (if any) setters and gestures act on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    None,
    Index(usize),
}

impl Selection {
    pub fn index(&self) -> Option<usize> {
        match self {
            Selection::None => None,
            Selection::Index(i) => Some(*i),
        }
    }
}

pub struct TextOverlay {
    pub pan_enabled: bool,
    pub scale_enabled: bool,
    pub rotation_enabled: bool,
    delete_enabled: bool,
    pub initial_text_size: f32,
    pub min_text_size: f32,
    pub max_text_size: f32,
    pub clamp_mode: ClampMode,

    texts: Vec<TextProperties>,
    selection: Selection,
    view_size: Vec2,
    image_bounds: Option<BoundingBox>,

    delete_zone: DeleteZone,
    delete_area_visible: bool,
    delete_button: DeleteButtonAnimator,

    listener: OverlayListener,
    measure: Box<dyn TextMeasure>,
    needs_redraw: bool,
}

impl TextOverlay {
    pub fn new(config: &OverlayConfig) -> Self {
        Self {
            pan_enabled: config.pan_enabled,
            scale_enabled: config.scale_enabled,
            rotation_enabled: config.rotation_enabled,
            delete_enabled: config.delete_enabled,
            initial_text_size: config.initial_text_size,
            min_text_size: config.min_text_size,
            max_text_size: config.max_text_size,
            clamp_mode: config.clamp_mode,
            texts: Vec::new(),
            selection: Selection::None,
            view_size: Vec2::ZERO,
            image_bounds: None,
            delete_zone: DeleteZone::new(config.delete_area_height, config.delete_button_height),
            delete_area_visible: false,
            delete_button: DeleteButtonAnimator::default(),
            listener: OverlayListener::default(),
            measure: Box::new(ApproxMeasure),
            needs_redraw: true,
        }
    }

    pub fn with_view_size(mut self, size: Vec2) -> Self {
        self.view_size = size;
        self
    }

    pub fn with_listener(mut self, listener: OverlayListener) -> Self {
        self.listener = listener;
        self
    }

    pub fn set_listener(&mut self, listener: OverlayListener) {
        self.listener = listener;
    }

    /// Swap the text measurement backend and re-measure every placed text.
    ///
    /// Matrices are rebuilt so rotation pivots follow the new boxes; no change
    /// notification fires since no host-visible value changes.
    pub fn set_measure(&mut self, measure: impl TextMeasure + 'static) {
        self.measure = Box::new(measure);
        for tp in &mut self.texts {
            tp.rebuild(self.measure.as_ref());
        }
        self.invalidate();
    }

    pub fn delete_enabled(&self) -> bool {
        self.delete_enabled
    }

    pub fn view_size(&self) -> Vec2 {
        self.view_size
    }

    /// Record the measured size of the view. Pixel positions are kept as they are.
    pub fn set_view_size(&mut self, size: Vec2) {
        if self.view_size != size {
            self.view_size = size;
            self.invalidate();
        }
    }

    /// Where the background image is drawn, in view pixels. Dragged texts are
    /// kept inside it according to [`ClampMode`].
    pub fn set_image_bounds(&mut self, bounds: Option<BoundingBox>) {
        if self.image_bounds != bounds {
            self.image_bounds = bounds;
            self.invalidate();
        }
    }

    /// Area dragged texts are clamped to: the image, or the view above the
    /// delete strip while no image is shown
    pub fn clamp_area(&self) -> BoundingBox {
        self.image_bounds.unwrap_or_else(|| {
            BoundingBox::new(
                0.0,
                0.0,
                self.view_size.x,
                (self.view_size.y - self.bottom_padding()).max(0.0),
            )
        })
    }

    /// Space reserved below the image for the delete strip
    pub fn bottom_padding(&self) -> f32 {
        if self.delete_enabled {
            self.delete_zone.area_height
        } else {
            0.0
        }
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn selected_properties(&self) -> Option<&TextProperties> {
        self.selected_index().map(|i| &self.texts[i])
    }

    // ------------------------------------------------------------------
    // Host API
    // ------------------------------------------------------------------

    /// Add a text centered in the view, above every existing text, and select it
    pub fn add_text(&mut self, content: impl Into<String>) {
        let mut tp = TextProperties::new(content, TextStyle::with_size(self.initial_text_size));
        tp.measure(self.measure.as_ref());
        tp.position = self.view_size / 2.0 - tp.bounding_box().center();

        debug!("Adding text {:?} at {:?}", tp.content, tp.position);
        self.texts.push(tp);
        let index = self.texts.len() - 1;
        self.selection = Selection::Index(index);
        self.text_changed(index);
    }

    /// Replace every text with a single new one
    pub fn set_text(&mut self, content: impl Into<String>) {
        self.texts.clear();
        self.selection = Selection::None;
        self.add_text(content);
    }

    /// Change the content of the selected text
    pub fn change_text(&mut self, content: impl Into<String>) {
        let content = content.into();
        self.update_selected(|tp| tp.content = content);
    }

    pub fn set_style(&mut self, style: TextStyle) {
        self.update_selected(|tp| tp.style = style);
    }

    pub fn set_font(&mut self, font: FontChoice) {
        self.update_selected(|tp| tp.style.font = font);
    }

    pub fn set_text_color(&mut self, color: Color) {
        self.update_selected(|tp| tp.style.color = color);
    }

    /// Cast a shadow at `angle_degrees`, `distance` times the text size away
    pub fn add_drop_shadow(&mut self, angle_degrees: f32, distance: f32, color: Color) {
        self.update_selected(|tp| {
            tp.style.shadow = Some(DropShadow::at_angle(
                tp.style.size,
                angle_degrees,
                distance,
                color,
            ));
        });
    }

    pub fn clear_drop_shadow(&mut self) {
        self.update_selected(|tp| tp.style.shadow = None);
    }

    /// Move the selected text; `position` is a fraction of the view size
    pub fn set_position(&mut self, position: Vec2) {
        let pixels = denormalize(position, self.view_size);
        self.update_selected(|tp| tp.position = pixels);
    }

    pub fn set_scale_factor(&mut self, scale: f32) {
        self.update_selected(|tp| tp.scale_factor = scale);
    }

    pub fn set_rotation_degrees(&mut self, rotation: f32) {
        self.update_selected(|tp| tp.rotation_degrees = rotation);
    }

    /// Snapshot of every text, in draw order
    pub fn texts(&self) -> Vec<TextEntry> {
        self.texts
            .iter()
            .map(|tp| tp.to_entry(self.view_size))
            .collect()
    }

    /// Snapshot of the selected text
    pub fn selected(&self) -> Option<TextEntry> {
        self.selected_properties()
            .map(|tp| tp.to_entry(self.view_size))
    }

    // ------------------------------------------------------------------
    // Gestures
    // ------------------------------------------------------------------

    pub fn handle_gesture(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Down { position } => self.on_down(position),
            GestureEvent::MoveBegin => self.on_move_begin(),
            GestureEvent::Move { distance } => self.on_move(distance),
            GestureEvent::MoveEnd => self.on_move_end(),
            GestureEvent::Scale { factor } => self.on_scale(factor),
            GestureEvent::Rotate { degrees_since_last } => self.on_rotate(degrees_since_last),
            GestureEvent::SingleTapConfirmed { position } => {
                self.on_single_tap_confirmed(position)
            }
        }
    }

    /// Select the text under the pointer. Every text is tested in list order
    /// and the last hit wins, which is the topmost drawn one. A miss keeps the
    /// current selection.
    pub fn on_down(&mut self, position: Vec2) {
        if let Some(index) = self.texts.iter().rposition(|tp| tp.hit_test(position)) {
            self.selection = Selection::Index(index);
        }
        self.invalidate();
    }

    pub fn on_move_begin(&mut self) {
        if self.delete_enabled && self.pan_enabled && self.selected_index().is_some() {
            self.delete_button.reset(1.0);
            self.delete_area_visible = true;
            self.invalidate();
        }
    }

    /// `distance` is the previous focal point minus the current one
    pub fn on_move(&mut self, distance: Vec2) {
        if !self.pan_enabled {
            return;
        }
        let Some(index) = self.selected_index() else {
            return;
        };

        self.texts[index].position -= distance;
        if self.clamp_mode != ClampMode::Unlimited {
            self.texts[index].rebuild(self.measure.as_ref());
            self.clamp_text(index);
        }
        self.text_changed(index);

        if self.delete_enabled && self.delete_area_visible {
            let hovering = self.in_delete_area(index);
            self.delete_button
                .animate_to(DeleteButtonAnimator::target_for(hovering));
        }
    }

    pub fn on_move_end(&mut self) {
        if !(self.delete_enabled && self.delete_area_visible) {
            return;
        }

        self.delete_area_visible = false;
        self.delete_button.reset(1.0);
        if let Some(index) = self.selected_index() {
            self.check_deleted(index);
        }
        self.invalidate();
    }

    /// Scale the selected text, keeping its rendered size within the configured
    /// limits. When the limits cross, the minimum wins.
    pub fn on_scale(&mut self, factor: f32) {
        if !self.scale_enabled {
            return;
        }
        let Some(base) = self.selected_properties().map(|tp| tp.style.size) else {
            return;
        };
        if base.is_nan() || base <= 0.0 {
            return;
        }
        let (min, max) = (self.min_text_size, self.max_text_size);
        self.update_selected(|tp| {
            let candidate = tp.scale_factor * factor * base;
            tp.scale_factor = candidate.min(max).max(min) / base;
        });
    }

    pub fn on_rotate(&mut self, degrees_since_last: f32) {
        if !self.rotation_enabled {
            return;
        }
        self.update_selected(|tp| tp.rotation_degrees -= degrees_since_last);
    }

    /// Report a tap to the host when it lands on the selected text
    pub fn on_single_tap_confirmed(&mut self, position: Vec2) {
        let Some(tp) = self.selected_properties() else {
            return;
        };
        if tp.hit_test(position) {
            let entry = tp.to_entry(self.view_size);
            debug!("Text tapped: {:?}", entry.content);
            self.listener.text_tapped(&entry);
        }
    }

    // ------------------------------------------------------------------
    // Delete affordance and drawing
    // ------------------------------------------------------------------

    pub fn delete_area_visible(&self) -> bool {
        self.delete_area_visible
    }

    pub fn delete_button_scale(&self) -> f32 {
        self.delete_button.value()
    }

    /// Current delete button rectangle, only while the delete strip is shown
    pub fn delete_button_rect(&self) -> Option<BoundingBox> {
        (self.delete_enabled && self.delete_area_visible).then(|| {
            self.delete_zone
                .button_rect(self.view_size, self.delete_button.value())
        })
    }

    /// Advance the delete button animation by one frame
    pub fn tick_animation(&mut self, delta_secs: f32) {
        if self.delete_button.tick(delta_secs) {
            self.invalidate();
        }
    }

    /// Draw the delete button (when shown) and then every text, back to front
    pub fn draw(&self, painter: &mut impl OverlayPainter) {
        if let Some(rect) = self.delete_button_rect() {
            painter.draw_delete_button(rect);
        }
        for tp in &self.texts {
            painter.draw_text(tp);
        }
    }

    /// Returns and clears the pending redraw request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    fn selected_index(&self) -> Option<usize> {
        self.selection.index().filter(|&i| i < self.texts.len())
    }

    /// Apply `mutate` to the selected text and refresh it; no-op without a selection
    fn update_selected(&mut self, mutate: impl FnOnce(&mut TextProperties)) {
        let Some(index) = self.selected_index() else {
            return;
        };
        mutate(&mut self.texts[index]);
        self.text_changed(index);
    }

    /// Re-measure, rebuild the matrix, schedule a redraw and notify the host
    fn text_changed(&mut self, index: usize) {
        self.texts[index].rebuild(self.measure.as_ref());
        self.invalidate();
        self.notify_texts_changed();
    }

    fn notify_texts_changed(&mut self) {
        if self.listener.wants_changes() {
            let texts = self.texts();
            self.listener.texts_changed(&texts);
        }
    }

    /// Shift a text so its enclosing box satisfies the clamp mode
    fn clamp_text(&mut self, index: usize) {
        let area = self.clamp_area();
        let bounds = self.texts[index].transformed_bounds();
        let (max_left, max_top) = match self.clamp_mode {
            ClampMode::Unlimited => return,
            ClampMode::OriginInside => (area.right, area.bottom),
            ClampMode::TextInside => (
                area.right - bounds.width(),
                area.bottom - bounds.height(),
            ),
        };
        let left = bounds.left.min(max_left).max(area.left);
        let top = bounds.top.min(max_top).max(area.top);
        self.texts[index].position += Vec2::new(left - bounds.left, top - bounds.top);
    }

    fn in_delete_area(&self, index: usize) -> bool {
        let button = self
            .delete_zone
            .button_rect(self.view_size, self.delete_button.value());
        button.intersects(&self.texts[index].transformed_bounds())
    }

    fn check_deleted(&mut self, index: usize) {
        if !self.in_delete_area(index) {
            return;
        }
        let removed = self.texts.remove(index);
        info!("Deleted text {:?}", removed.content);
        self.selection = Selection::None;
        self.invalidate();
        self.notify_texts_changed();
    }
}

impl std::fmt::Debug for TextOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextOverlay")
            .field("texts", &self.texts.len())
            .field("selection", &self.selection)
            .field("view_size", &self.view_size)
            .field("pan_enabled", &self.pan_enabled)
            .field("scale_enabled", &self.scale_enabled)
            .field("rotation_enabled", &self.rotation_enabled)
            .field("delete_enabled", &self.delete_enabled)
            .finish()
    }
}
