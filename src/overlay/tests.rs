//! Behavior tests for the overlay, driven without any UI surface.

use std::sync::{Arc, Mutex};

use bevy::math::Vec2;
use bevy::prelude::Color;

use super::*;
use crate::constants::DELETE_BUTTON_ANIMATION_SECS;
use crate::geometry::BoundingBox;
use crate::gestures::GestureEvent;

const VIEW: Vec2 = Vec2::new(1000.0, 500.0);

#[derive(Default, Clone)]
struct Recorded {
    changes: Arc<Mutex<Vec<Vec<TextEntry>>>>,
    taps: Arc<Mutex<Vec<TextEntry>>>,
}

impl Recorded {
    fn listener(&self) -> OverlayListener {
        let changes = self.changes.clone();
        let taps = self.taps.clone();
        OverlayListener::new()
            .on_texts_changed(move |texts| changes.lock().unwrap().push(texts.to_vec()))
            .on_text_tapped(move |text| taps.lock().unwrap().push(text.clone()))
    }

    fn change_count(&self) -> usize {
        self.changes.lock().unwrap().len()
    }

    fn tap_count(&self) -> usize {
        self.taps.lock().unwrap().len()
    }

    fn last_change(&self) -> Vec<TextEntry> {
        self.changes.lock().unwrap().last().cloned().unwrap_or_default()
    }
}

fn overlay_with(config: OverlayConfig) -> (TextOverlay, Recorded) {
    let recorded = Recorded::default();
    let overlay = TextOverlay::new(&config)
        .with_view_size(VIEW)
        .with_listener(recorded.listener());
    (overlay, recorded)
}

fn overlay() -> (TextOverlay, Recorded) {
    overlay_with(OverlayConfig::all_gestures())
}

/// Center of the selected text's glyph box in view pixels
fn selected_center(overlay: &TextOverlay) -> Vec2 {
    let tp = overlay.selected_properties().unwrap();
    tp.matrix().map_point(tp.bounding_box().center())
}

#[derive(Default)]
struct RecordingPainter {
    calls: Vec<String>,
}

impl OverlayPainter for RecordingPainter {
    fn draw_delete_button(&mut self, _rect: BoundingBox) {
        self.calls.push("delete".to_string());
    }

    fn draw_text(&mut self, text: &TextProperties) {
        self.calls.push(text.content().to_string());
    }
}

struct DoubleWidth;

impl TextMeasure for DoubleWidth {
    fn measure(&self, content: &str, style: &TextStyle) -> BoundingBox {
        let b = ApproxMeasure.measure(content, style);
        BoundingBox::new(b.left, b.top, b.right * 2.0, b.bottom)
    }
}

// ----------------------------------------------------------------------------
// Add / set / select
// ----------------------------------------------------------------------------

#[test]
fn test_each_added_text_is_selected() {
    let (mut overlay, recorded) = overlay();
    for i in 0..5 {
        overlay.add_text(format!("Text {}", i));
        assert_eq!(overlay.len(), i + 1);
        assert_eq!(overlay.selection(), Selection::Index(i));
        assert_eq!(overlay.selected().unwrap().content, format!("Text {}", i));
    }
    assert_eq!(recorded.change_count(), 5);
    assert_eq!(recorded.last_change().len(), 5);
}

#[test]
fn test_set_text_leaves_exactly_one() {
    let (mut overlay, _) = overlay();
    overlay.add_text("one");
    overlay.add_text("two");
    overlay.add_text("three");

    overlay.set_text("caption");
    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay.selection(), Selection::Index(0));
    assert_eq!(overlay.texts()[0].content, "caption");

    let (mut empty, _) = overlay_with(OverlayConfig::default());
    empty.set_text("first");
    assert_eq!(empty.len(), 1);
}

#[test]
fn test_added_text_is_centered() {
    let (mut overlay, _) = overlay();
    overlay.add_text("Hello");

    let center = selected_center(&overlay);
    assert!((center - VIEW / 2.0).length() < 1e-3);

    let entry = overlay.selected().unwrap();
    let half_box = overlay.selected_properties().unwrap().bounding_box().size() / 2.0;
    let tolerance = half_box / VIEW;
    assert!((entry.position.x - 0.5).abs() <= tolerance.x);
    assert!((entry.position.y - 0.5).abs() <= tolerance.y);
    assert_eq!(entry.scale_factor, 1.0);
    assert_eq!(entry.rotation_degrees, 0.0);
    assert_eq!(entry.text_size, OverlayConfig::default().initial_text_size);
}

#[test]
fn test_down_selects_text_under_pointer() {
    let (mut overlay, _) = overlay();
    overlay.add_text("left");
    overlay.set_position(Vec2::new(0.1, 0.5));
    let left_center = selected_center(&overlay);

    overlay.add_text("right");
    overlay.set_position(Vec2::new(0.7, 0.5));
    assert_eq!(overlay.selection(), Selection::Index(1));

    overlay.handle_gesture(GestureEvent::Down {
        position: left_center,
    });
    assert_eq!(overlay.selection(), Selection::Index(0));
}

#[test]
fn test_down_on_overlap_selects_latest() {
    let (mut overlay, _) = overlay();
    overlay.add_text("bottom");
    let bottom_center = selected_center(&overlay);
    overlay.add_text("top");
    let center = selected_center(&overlay);
    // Both are centered in the view, so they overlap there
    assert!((bottom_center - center).length() < 1e-3);

    // Start from a third text well away from the overlap
    overlay.add_text("aside");
    overlay.set_position(Vec2::new(0.02, 0.02));
    assert_eq!(overlay.selection(), Selection::Index(2));
    assert!(!overlay.selected_properties().unwrap().hit_test(center));

    overlay.on_down(center);
    assert_eq!(overlay.selection(), Selection::Index(1));
}

#[test]
fn test_down_on_empty_space_keeps_selection() {
    let (mut overlay, _) = overlay();
    overlay.add_text("a");
    overlay.add_text("b");
    overlay.on_down(Vec2::new(2.0, 2.0));
    assert_eq!(overlay.selection(), Selection::Index(1));
}

// ----------------------------------------------------------------------------
// Setters
// ----------------------------------------------------------------------------

#[test]
fn test_setters_without_selection_are_noops() {
    let (mut overlay, recorded) = overlay();

    overlay.change_text("x");
    overlay.set_style(TextStyle::with_size(99.0));
    overlay.set_font(FontChoice::Monospace);
    overlay.set_text_color(Color::WHITE);
    overlay.add_drop_shadow(45.0, 0.02, Color::BLACK);
    overlay.clear_drop_shadow();
    overlay.set_position(Vec2::new(0.2, 0.2));
    overlay.set_scale_factor(3.0);
    overlay.set_rotation_degrees(45.0);
    overlay.on_scale(2.0);
    overlay.on_rotate(10.0);
    overlay.on_move(Vec2::new(5.0, 5.0));
    overlay.on_single_tap_confirmed(VIEW / 2.0);

    assert!(overlay.is_empty());
    assert!(overlay.selected().is_none());
    assert_eq!(recorded.change_count(), 0);
    assert_eq!(recorded.tap_count(), 0);
}

#[test]
fn test_setters_after_delete_do_not_touch_remaining_texts() {
    let mut config = OverlayConfig::all_gestures();
    config.delete_enabled = true;
    let (mut overlay, recorded) = overlay_with(config);

    overlay.add_text("keep");
    overlay.set_position(Vec2::new(0.1, 0.1));
    overlay.add_text("drop");
    drag_selected_into_delete_zone(&mut overlay);
    assert_eq!(overlay.selection(), Selection::None);

    let before = overlay.texts();
    let changes = recorded.change_count();
    overlay.set_rotation_degrees(90.0);
    overlay.change_text("changed");
    overlay.set_scale_factor(2.0);
    assert_eq!(overlay.texts(), before);
    assert_eq!(recorded.change_count(), changes);
}

#[test]
fn test_position_round_trip_through_setter() {
    let (mut overlay, _) = overlay();
    overlay.add_text("moved");
    overlay.set_position(Vec2::new(0.25, 0.75));

    let entry = overlay.selected().unwrap();
    assert!((entry.position - Vec2::new(0.25, 0.75)).length() < 1e-6);
    let tp = overlay.selected_properties().unwrap();
    assert!((tp.position() - Vec2::new(250.0, 375.0)).length() < 1e-3);
}

#[test]
fn test_style_setters_update_snapshot() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("styled");
    let before = recorded.change_count();

    overlay.set_text_color(Color::srgb(1.0, 0.0, 0.0));
    overlay.set_font(FontChoice::Monospace);
    overlay.add_drop_shadow(45.0, 0.02, Color::BLACK);

    let entry = overlay.selected().unwrap();
    assert_eq!(entry.text_color, Color::srgb(1.0, 0.0, 0.0));
    assert_eq!(entry.font, FontChoice::Monospace);
    assert!(
        overlay
            .selected_properties()
            .unwrap()
            .style()
            .shadow
            .is_some()
    );
    assert_eq!(recorded.change_count(), before + 3);
}

#[test]
fn test_change_text_remeasures() {
    let (mut overlay, _) = overlay();
    overlay.add_text("ab");
    let short = overlay.selected_properties().unwrap().bounding_box().width();
    overlay.change_text("abcdef");
    let long = overlay.selected_properties().unwrap().bounding_box().width();
    assert!(long > short);
    assert_eq!(overlay.selected().unwrap().content, "abcdef");
}

#[test]
fn test_set_measure_remeasures_without_notifying() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("wide");
    let width = overlay.selected_properties().unwrap().bounding_box().width();
    let changes = recorded.change_count();

    overlay.set_measure(DoubleWidth);
    let doubled = overlay.selected_properties().unwrap().bounding_box().width();
    assert!((doubled - width * 2.0).abs() < 1e-4);
    assert_eq!(recorded.change_count(), changes);
}

// ----------------------------------------------------------------------------
// Gestures
// ----------------------------------------------------------------------------

#[test]
fn test_pan_moves_selected_text_and_notifies_once() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("pan me");
    let start = overlay.selected_properties().unwrap().position();
    let before = recorded.change_count();

    // Finger moved by (10, -5): the recognizer reports previous - current
    overlay.handle_gesture(GestureEvent::Move {
        distance: Vec2::new(-10.0, 5.0),
    });

    let moved = overlay.selected_properties().unwrap().position();
    assert!((moved - (start + Vec2::new(10.0, -5.0))).length() < 1e-4);
    assert_eq!(recorded.change_count(), before + 1);
}

#[test]
fn test_pan_disabled_ignores_moves() {
    let (mut overlay, recorded) = overlay_with(OverlayConfig::default());
    overlay.add_text("still");
    let start = overlay.selected_properties().unwrap().position();
    let before = recorded.change_count();

    overlay.on_move(Vec2::new(-50.0, 0.0));
    assert_eq!(overlay.selected_properties().unwrap().position(), start);
    assert_eq!(recorded.change_count(), before);
}

#[test]
fn test_scale_is_clamped_to_text_size_limits() {
    let (mut overlay, _) = overlay();
    overlay.add_text("zoom");
    let config = OverlayConfig::all_gestures();

    overlay.on_scale(1.5);
    assert!((overlay.selected().unwrap().scale_factor - 1.5).abs() < 1e-5);

    overlay.on_scale(100.0);
    let entry = overlay.selected().unwrap();
    assert!((entry.rendered_size() - config.max_text_size).abs() < 1e-3);

    overlay.on_scale(0.0001);
    let entry = overlay.selected().unwrap();
    assert!((entry.rendered_size() - config.min_text_size).abs() < 1e-3);
    // Expressed against the base size, not the candidate
    assert!((entry.scale_factor - config.min_text_size / entry.text_size).abs() < 1e-5);
}

#[test]
fn test_scale_with_crossed_limits_settles_on_minimum() {
    let mut config = OverlayConfig::all_gestures();
    config.max_text_size = config.min_text_size - 2.0;
    let (mut overlay, _) = overlay_with(config.clone());
    overlay.add_text("crossed");

    overlay.on_scale(1.2);
    let entry = overlay.selected().unwrap();
    assert!((entry.rendered_size() - config.min_text_size).abs() < 1e-3);
}

#[test]
fn test_scale_ignores_zero_text_size() {
    let (mut overlay, _) = overlay();
    overlay.add_text("flat");
    overlay.set_style(TextStyle::with_size(0.0));

    overlay.on_scale(2.0);
    assert_eq!(overlay.selected().unwrap().scale_factor, 1.0);
}

#[test]
fn test_scale_disabled_ignores_pinch() {
    let (mut overlay, _) = overlay_with(OverlayConfig::default());
    overlay.add_text("fixed");
    overlay.on_scale(3.0);
    assert_eq!(overlay.selected().unwrap().scale_factor, 1.0);
}

#[test]
fn test_rotation_subtracts_detector_delta() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("spin");
    let before = recorded.change_count();

    overlay.handle_gesture(GestureEvent::Rotate {
        degrees_since_last: 10.0,
    });
    overlay.handle_gesture(GestureEvent::Rotate {
        degrees_since_last: -4.0,
    });
    assert!((overlay.selected().unwrap().rotation_degrees + 6.0).abs() < 1e-5);
    assert_eq!(recorded.change_count(), before + 2);

    // Rotating keeps the box center fixed for an unscaled text
    let center = selected_center(&overlay);
    assert!((center - VIEW / 2.0).length() < 1e-3);
}

#[test]
fn test_rotation_disabled_ignores_twist() {
    let (mut overlay, _) = overlay_with(OverlayConfig::default());
    overlay.add_text("level");
    overlay.on_rotate(30.0);
    assert_eq!(overlay.selected().unwrap().rotation_degrees, 0.0);
}

#[test]
fn test_tap_on_selected_text_notifies() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("tap me");
    let center = selected_center(&overlay);

    overlay.handle_gesture(GestureEvent::SingleTapConfirmed { position: center });
    assert_eq!(recorded.tap_count(), 1);
    assert_eq!(recorded.taps.lock().unwrap()[0].content, "tap me");
}

#[test]
fn test_tap_outside_every_text_does_not_notify() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("a");
    overlay.add_text("b");
    overlay.handle_gesture(GestureEvent::SingleTapConfirmed {
        position: Vec2::new(3.0, 3.0),
    });
    assert_eq!(recorded.tap_count(), 0);
}

#[test]
fn test_tap_only_considers_selected_text() {
    let (mut overlay, recorded) = overlay();
    overlay.add_text("other");
    overlay.set_position(Vec2::new(0.1, 0.1));
    let other_center = selected_center(&overlay);
    overlay.add_text("selected");

    overlay.on_single_tap_confirmed(other_center);
    assert_eq!(recorded.tap_count(), 0);
}

// ----------------------------------------------------------------------------
// Clamping
// ----------------------------------------------------------------------------

const IMAGE: BoundingBox = BoundingBox {
    left: 100.0,
    top: 50.0,
    right: 900.0,
    bottom: 350.0,
};

fn clamped_overlay(mode: ClampMode) -> TextOverlay {
    let mut config = OverlayConfig::all_gestures();
    config.clamp_mode = mode;
    let (mut overlay, _) = overlay_with(config);
    overlay.set_image_bounds(Some(IMAGE));
    overlay.add_text("fenced");
    overlay
}

fn selected_bounds(overlay: &TextOverlay) -> BoundingBox {
    overlay.selected_properties().unwrap().transformed_bounds()
}

#[test]
fn test_text_inside_keeps_whole_box_on_image() {
    let mut overlay = clamped_overlay(ClampMode::TextInside);
    overlay.set_rotation_degrees(30.0);

    overlay.on_move(Vec2::new(-2000.0, 0.0));
    let bounds = selected_bounds(&overlay);
    assert!((bounds.right - IMAGE.right).abs() < 1e-3);
    assert!(bounds.left >= IMAGE.left);

    overlay.on_move(Vec2::new(0.0, 2000.0));
    let bounds = selected_bounds(&overlay);
    assert!((bounds.top - IMAGE.top).abs() < 1e-3);
    assert!((bounds.right - IMAGE.right).abs() < 1e-3);
}

#[test]
fn test_origin_inside_lets_text_hang_over_edge() {
    let mut overlay = clamped_overlay(ClampMode::OriginInside);

    overlay.on_move(Vec2::new(-2000.0, -2000.0));
    let bounds = selected_bounds(&overlay);
    assert!((bounds.left - IMAGE.right).abs() < 1e-3);
    assert!((bounds.top - IMAGE.bottom).abs() < 1e-3);
    assert!(bounds.right > IMAGE.right);
}

#[test]
fn test_unlimited_moves_freely() {
    let mut overlay = clamped_overlay(ClampMode::Unlimited);
    overlay.on_move(Vec2::new(-2000.0, 0.0));
    assert!(selected_bounds(&overlay).left > IMAGE.right);
}

#[test]
fn test_clamp_without_image_stays_above_delete_strip() {
    let mut config = OverlayConfig::all_gestures();
    config.clamp_mode = ClampMode::TextInside;
    let (mut overlay, _) = overlay_with(config);
    overlay.add_text("no image");

    overlay.on_move(Vec2::new(0.0, -2000.0));
    let bounds = selected_bounds(&overlay);
    let floor = VIEW.y - overlay.bottom_padding();
    assert!((bounds.bottom - floor).abs() < 1e-3);
    assert_eq!(overlay.clamp_area().bottom, floor);
}

// ----------------------------------------------------------------------------
// Delete zone
// ----------------------------------------------------------------------------

fn delete_config() -> OverlayConfig {
    OverlayConfig::all_gestures()
}

/// Drag the selected text down onto the delete button and release
fn drag_selected_into_delete_zone(overlay: &mut TextOverlay) {
    overlay.handle_gesture(GestureEvent::MoveBegin);
    let center = selected_center(overlay);
    let target = overlay.delete_button_rect().unwrap().center();
    overlay.handle_gesture(GestureEvent::Move {
        distance: center - target,
    });
    overlay.handle_gesture(GestureEvent::MoveEnd);
}

#[test]
fn test_drop_on_delete_zone_removes_text() {
    let (mut overlay, recorded) = overlay_with(delete_config());
    overlay.add_text("keep");
    overlay.set_position(Vec2::new(0.1, 0.1));
    overlay.add_text("trash");

    overlay.handle_gesture(GestureEvent::MoveBegin);
    assert!(overlay.delete_area_visible());
    let center = selected_center(&overlay);
    let target = overlay.delete_button_rect().unwrap().center();
    overlay.handle_gesture(GestureEvent::Move {
        distance: center - target,
    });

    let before = recorded.change_count();
    overlay.handle_gesture(GestureEvent::MoveEnd);

    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay.selection(), Selection::None);
    assert!(!overlay.delete_area_visible());
    assert_eq!(recorded.change_count(), before + 1);
    let last = recorded.last_change();
    assert_eq!(last.len(), 1);
    assert_eq!(last[0].content, "keep");
}

#[test]
fn test_drop_elsewhere_keeps_text() {
    let (mut overlay, recorded) = overlay_with(delete_config());
    overlay.add_text("safe");
    overlay.on_move_begin();
    overlay.on_move(Vec2::new(0.0, 40.0));
    let before = recorded.change_count();
    overlay.on_move_end();

    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay.selection(), Selection::Index(0));
    assert_eq!(recorded.change_count(), before);
}

#[test]
fn test_delete_disabled_never_removes() {
    let mut config = delete_config();
    config.delete_enabled = false;
    let (mut overlay, _) = overlay_with(config);
    overlay.add_text("stays");

    overlay.on_move_begin();
    assert!(!overlay.delete_area_visible());
    assert!(overlay.delete_button_rect().is_none());
    // Straight down to where the strip would be
    overlay.on_move(Vec2::new(0.0, -220.0));
    overlay.on_move_end();
    assert_eq!(overlay.len(), 1);
    assert_eq!(overlay.bottom_padding(), 0.0);
}

#[test]
fn test_delete_button_grows_while_hovering_and_resets_on_release() {
    let (mut overlay, _) = overlay_with(delete_config());
    overlay.add_text("hover");
    overlay.on_move_begin();

    let center = selected_center(&overlay);
    let target = overlay.delete_button_rect().unwrap().center();
    overlay.on_move(center - target);
    overlay.tick_animation(DELETE_BUTTON_ANIMATION_SECS);
    assert!((overlay.delete_button_scale() - 1.5).abs() < 1e-4);

    // Dragging back out eases toward the resting size
    overlay.on_move(Vec2::new(0.0, 200.0));
    overlay.tick_animation(DELETE_BUTTON_ANIMATION_SECS / 2.0);
    assert!(overlay.delete_button_scale() < 1.5);
    assert!(overlay.delete_button_scale() > 1.0);

    overlay.on_move_end();
    assert_eq!(overlay.delete_button_scale(), 1.0);
    overlay.tick_animation(1.0);
    assert_eq!(overlay.delete_button_scale(), 1.0);
}

#[test]
fn test_delete_strip_needs_a_selection() {
    let (mut overlay, _) = overlay_with(delete_config());
    overlay.on_move_begin();
    assert!(!overlay.delete_area_visible());
}

// ----------------------------------------------------------------------------
// Drawing
// ----------------------------------------------------------------------------

#[test]
fn test_draw_order_is_delete_button_then_texts() {
    let (mut overlay, _) = overlay_with(delete_config());
    overlay.add_text("back");
    overlay.add_text("front");

    let mut painter = RecordingPainter::default();
    overlay.draw(&mut painter);
    assert_eq!(painter.calls, vec!["back", "front"]);

    overlay.on_move_begin();
    let mut painter = RecordingPainter::default();
    overlay.draw(&mut painter);
    assert_eq!(painter.calls, vec!["delete", "back", "front"]);
}

#[test]
fn test_redraw_requested_after_mutation() {
    let (mut overlay, _) = overlay();
    overlay.take_redraw_request();
    assert!(!overlay.take_redraw_request());

    overlay.add_text("dirty");
    assert!(overlay.take_redraw_request());
    assert!(!overlay.take_redraw_request());

    overlay.on_down(Vec2::ZERO);
    assert!(overlay.take_redraw_request());
}
