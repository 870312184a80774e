//! egui rendering of the overlay.

use bevy::prelude::*;
use bevy_egui::egui::epaint::TextShape;
use bevy_egui::{EguiContexts, egui};

use super::layout::fit_center;
use super::{OverlayBackground, OverlayViewport, OverlayWidget};
use crate::geometry::BoundingBox;
use crate::overlay::{FontChoice, OverlayPainter, TextMeasure, TextProperties, TextStyle};
use crate::theme::{self, bevy_to_egui};

fn font_id(font: FontChoice, size: f32) -> egui::FontId {
    match font {
        FontChoice::Proportional => egui::FontId::proportional(size),
        FontChoice::Monospace => egui::FontId::monospace(size),
    }
}

fn to_pos(v: Vec2) -> egui::Pos2 {
    egui::pos2(v.x, v.y)
}

fn to_rect(b: BoundingBox) -> egui::Rect {
    egui::Rect::from_min_max(egui::pos2(b.left, b.top), egui::pos2(b.right, b.bottom))
}

/// Measures glyph boxes with egui's own text layout. The local origin is the
/// galley's top-left corner, which is where [`EguiPainter`] anchors text.
pub struct EguiMeasure {
    painter: egui::Painter,
}

impl EguiMeasure {
    pub fn new(painter: egui::Painter) -> Self {
        Self { painter }
    }
}

impl TextMeasure for EguiMeasure {
    fn measure(&self, content: &str, style: &TextStyle) -> BoundingBox {
        if content.is_empty() {
            return BoundingBox::EMPTY;
        }
        let galley = self.painter.layout_no_wrap(
            content.to_owned(),
            font_id(style.font, style.size),
            egui::Color32::PLACEHOLDER,
        );
        let size = galley.size();
        BoundingBox::new(0.0, 0.0, size.x, size.y)
    }
}

/// Draws overlay content onto an egui painter. View coordinates are offset by
/// `origin`, the top-left of the view on screen.
pub struct EguiPainter<'a> {
    painter: &'a egui::Painter,
    origin: Vec2,
    delete_hover: bool,
}

impl<'a> EguiPainter<'a> {
    pub fn new(painter: &'a egui::Painter, origin: Vec2, delete_hover: bool) -> Self {
        Self {
            painter,
            origin,
            delete_hover,
        }
    }

    fn screen(&self, view: Vec2) -> egui::Pos2 {
        to_pos(view + self.origin)
    }

    fn text_at(&self, text: &TextProperties, local: Vec2, color: egui::Color32) {
        let size = text.style().size * text.scale_factor();
        if size <= 0.0 {
            return;
        }
        let galley = self.painter.layout_no_wrap(
            text.content().to_owned(),
            font_id(text.style().font, size),
            color,
        );
        let pos = self.screen(text.matrix().map_point(local));
        let shape = TextShape::new(pos, galley, color)
            .with_angle(text.rotation_degrees().to_radians());
        self.painter.add(shape);
    }
}

impl OverlayPainter for EguiPainter<'_> {
    fn draw_delete_button(&mut self, rect: BoundingBox) {
        let rect = to_rect(rect.translated(self.origin));
        let radius = rect.width().min(rect.height()) / 2.0;
        let center = rect.center();
        let fill = if self.delete_hover {
            theme::DELETE_BUTTON_HOVER_FILL
        } else {
            theme::DELETE_BUTTON_FILL
        };
        self.painter.circle_filled(center, radius, fill);

        // Trash can: lid, handle, body and two ribs
        let u = radius / 4.0;
        let stroke = egui::Stroke::new((u / 3.0).max(1.0), theme::DELETE_BUTTON_ICON);
        let at = |x: f32, y: f32| center + egui::vec2(x * u, y * u);
        self.painter.line_segment([at(-1.6, -1.2), at(1.6, -1.2)], stroke);
        self.painter.line_segment([at(-0.5, -1.7), at(0.5, -1.7)], stroke);
        self.painter.add(egui::Shape::closed_line(
            vec![at(-1.2, -1.2), at(1.2, -1.2), at(0.9, 1.8), at(-0.9, 1.8)],
            stroke,
        ));
        self.painter.line_segment([at(-0.4, -0.6), at(-0.3, 1.2)], stroke);
        self.painter.line_segment([at(0.4, -0.6), at(0.3, 1.2)], stroke);
    }

    fn draw_text(&mut self, text: &TextProperties) {
        if text.content().is_empty() {
            return;
        }
        if let Some(shadow) = text.style().shadow {
            self.text_at(text, shadow.offset, bevy_to_egui(shadow.color));
        }
        self.text_at(text, Vec2::ZERO, bevy_to_egui(text.style().color));
    }
}

/// Draw the background image and the overlay in the central panel
pub fn render_overlay(
    mut contexts: EguiContexts,
    mut widget: ResMut<OverlayWidget>,
    mut viewport: ResMut<OverlayViewport>,
    background: Res<OverlayBackground>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let widget = &mut *widget;

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(theme::VIEW_BACKGROUND))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(ui.available_size(), egui::Sense::hover());
            let rect = response.rect;
            let bounds = BoundingBox::new(rect.min.x, rect.min.y, rect.max.x, rect.max.y);
            viewport.bounds = Some(bounds);
            viewport.pointer_inside = response.contains_pointer();

            let overlay = &mut widget.overlay;
            overlay.set_view_size(bounds.size());
            if !widget.measure_installed {
                overlay.set_measure(EguiMeasure::new(painter.clone()));
                widget.measure_installed = true;
                debug!("Installed egui text measurement");
            }

            let mut image_bounds = None;
            if let Some(texture) = &background.texture {
                let [w, h] = texture.size();
                let image_area = BoundingBox::new(
                    0.0,
                    0.0,
                    bounds.width(),
                    bounds.height() - overlay.bottom_padding(),
                );
                let fitted = fit_center(Vec2::new(w as f32, h as f32), image_area);
                if !fitted.is_empty() {
                    image_bounds = Some(fitted);
                    painter.image(
                        texture.id(),
                        to_rect(fitted.translated(bounds.min())),
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
            }

            overlay.set_image_bounds(image_bounds);

            let hover = overlay.delete_button_scale() > 1.0;
            overlay.draw(&mut EguiPainter::new(&painter, bounds.min(), hover));
        });

    if widget.overlay.take_redraw_request() {
        ctx.request_repaint();
    }

    Ok(())
}
