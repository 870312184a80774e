//! Bevy input → pointer events.
//!
//! Touches keep their own ids; the left mouse button acts as one more pointer
//! with [`MOUSE_POINTER_ID`]. A pointer is only picked up when it goes down
//! inside the view; after that it is followed until it lifts, wherever it goes.

use bevy::ecs::system::SystemParam;
use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::input::touch::Touches;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::{OverlayViewport, OverlayWidget};
use crate::constants::{MOUSE_POINTER_ID, WHEEL_ROTATION_STEP, WHEEL_SCALE_STEP};
use crate::gestures::{GestureEvent, PointerEvent};

/// Bundled window and viewport access for cursor-to-view conversion
#[derive(SystemParam)]
pub struct PointerParams<'w, 's> {
    pub window: Query<'w, 's, &'static Window, With<PrimaryWindow>>,
    pub viewport: Res<'w, OverlayViewport>,
}

impl PointerParams<'_, '_> {
    /// Cursor position in window coordinates, if the cursor is in the window
    pub fn cursor_window_pos(&self) -> Option<Vec2> {
        self.window.single().ok()?.cursor_position()
    }

    /// Cursor position in view coordinates, if the cursor is over the view
    pub fn cursor_over_view(&self) -> Option<Vec2> {
        let cursor = self.cursor_window_pos()?;
        if !self.viewport.pointer_inside || !self.viewport.contains(cursor) {
            return None;
        }
        self.viewport.to_local(cursor)
    }
}

pub fn feed_pointer_input(
    time: Res<Time>,
    touches: Res<Touches>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    pointer: PointerParams,
    mut widget: ResMut<OverlayWidget>,
    mut last_mouse: Local<Option<Vec2>>,
) {
    let now = time.elapsed_secs_f64();
    let mut events = Vec::new();

    for touch in touches.iter_just_pressed() {
        if pointer.viewport.contains(touch.position())
            && let Some(local) = pointer.viewport.to_local(touch.position())
        {
            events.push(PointerEvent::pressed(touch.id(), local, now));
        }
    }
    for touch in touches.iter() {
        if touch.delta() != Vec2::ZERO
            && let Some(local) = pointer.viewport.to_local(touch.position())
        {
            events.push(PointerEvent::moved(touch.id(), local, now));
        }
    }
    for touch in touches.iter_just_released() {
        if let Some(local) = pointer.viewport.to_local(touch.position()) {
            events.push(PointerEvent::released(touch.id(), local, now));
        }
    }
    for touch in touches.iter_just_canceled() {
        if let Some(local) = pointer.viewport.to_local(touch.position()) {
            events.push(PointerEvent::cancelled(touch.id(), local, now));
        }
    }

    // The mouse has no position outside the window; keep the last known one
    let cursor = pointer
        .cursor_window_pos()
        .and_then(|p| pointer.viewport.to_local(p));
    let mouse_tracked = widget.recognizer().is_tracking(MOUSE_POINTER_ID);

    if mouse_button.just_pressed(MouseButton::Left)
        && let Some(local) = pointer.cursor_over_view()
    {
        events.push(PointerEvent::pressed(MOUSE_POINTER_ID, local, now));
        *last_mouse = Some(local);
    } else if mouse_tracked {
        if let Some(local) = cursor
            && *last_mouse != Some(local)
        {
            events.push(PointerEvent::moved(MOUSE_POINTER_ID, local, now));
            *last_mouse = Some(local);
        }
        if mouse_button.just_released(MouseButton::Left) || !mouse_button.pressed(MouseButton::Left)
        {
            let local = cursor.or(*last_mouse).unwrap_or_default();
            events.push(PointerEvent::released(MOUSE_POINTER_ID, local, now));
        }
    }

    let widget = &mut *widget;
    for event in events {
        let gestures = widget.recognizer.process(event);
        widget.apply_gestures(gestures);
    }
    let confirmed = widget.recognizer.tick(now);
    widget.apply_gestures(confirmed);
}

/// Wheel scales the selected text; with Shift held it rotates it instead
pub fn feed_mouse_wheel(
    mut scroll_events: MessageReader<MouseWheel>,
    keyboard: Res<ButtonInput<KeyCode>>,
    pointer: PointerParams,
    mut widget: ResMut<OverlayWidget>,
) {
    if pointer.cursor_over_view().is_none() {
        scroll_events.clear();
        return;
    }

    let rotate = keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]);
    for event in scroll_events.read() {
        let lines = wheel_lines(event);
        if lines == 0.0 {
            continue;
        }
        let gesture = if rotate {
            GestureEvent::Rotate {
                degrees_since_last: -lines * WHEEL_ROTATION_STEP,
            }
        } else {
            GestureEvent::Scale {
                factor: WHEEL_SCALE_STEP.powf(lines),
            }
        };
        widget.overlay.handle_gesture(gesture);
    }
}

/// Wheel travel in lines. Shift+wheel arrives as horizontal motion on some
/// platforms, so both axes count.
fn wheel_lines(event: &MouseWheel) -> f32 {
    let amount = if event.y != 0.0 { event.y } else { event.x };
    match event.unit {
        MouseScrollUnit::Line => amount,
        MouseScrollUnit::Pixel => amount * 0.01,
    }
}
