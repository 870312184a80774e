//! Working copy of a placed text in pixel coordinates.

use bevy::math::Vec2;

use super::entry::{TextEntry, normalize};
use super::measure::TextMeasure;
use super::style::TextStyle;
use crate::geometry::{BoundingBox, TextMatrix};

#[derive(Debug, Clone)]
pub struct TextProperties {
    pub(crate) content: String,
    pub(crate) style: TextStyle,
    /// Anchor position in view pixels
    pub(crate) position: Vec2,
    pub(crate) scale_factor: f32,
    pub(crate) rotation_degrees: f32,
    bounding_box: BoundingBox,
    matrix: TextMatrix,
}

impl TextProperties {
    pub(crate) fn new(content: impl Into<String>, style: TextStyle) -> Self {
        Self {
            content: content.into(),
            style,
            position: Vec2::ZERO,
            scale_factor: 1.0,
            rotation_degrees: 0.0,
            bounding_box: BoundingBox::EMPTY,
            matrix: TextMatrix::IDENTITY,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    /// Glyph box in local, unscaled and unrotated space
    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Forward transform from local glyph space to view pixels
    pub fn matrix(&self) -> &TextMatrix {
        &self.matrix
    }

    /// Re-measure the glyph box only, leaving the matrix untouched
    pub(crate) fn measure(&mut self, measure: &dyn TextMeasure) {
        self.bounding_box = measure.measure(&self.content, &self.style);
    }

    /// Re-measure the glyph box and rebuild the forward matrix from scratch.
    ///
    /// The box must be fresh before the rotation pivot is taken from it.
    pub(crate) fn rebuild(&mut self, measure: &dyn TextMeasure) {
        self.measure(measure);

        let scale = self.scale_factor;
        self.matrix.reset();
        self.matrix.set_scale(scale);
        self.matrix.pre_translate(self.position / scale);
        self.matrix
            .pre_rotate(self.rotation_degrees, self.bounding_box.center() / scale);
    }

    /// Map a view-space point into local glyph space through the inverse of the
    /// current forward matrix. `None` when the matrix cannot be inverted.
    pub fn inverse_map(&self, point: Vec2) -> Option<Vec2> {
        self.matrix.invert().map(|inverse| inverse.map_point(point))
    }

    /// Whether a view-space point falls inside this text's glyph box
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.inverse_map(point)
            .is_some_and(|local| self.bounding_box.contains(local))
    }

    /// Axis-aligned view-space box enclosing the transformed glyph box
    pub fn transformed_bounds(&self) -> BoundingBox {
        self.matrix.map_rect(&self.bounding_box)
    }

    pub fn to_entry(&self, view_size: Vec2) -> TextEntry {
        TextEntry {
            content: self.content.clone(),
            position: normalize(self.position, view_size),
            scale_factor: self.scale_factor,
            rotation_degrees: self.rotation_degrees,
            text_color: self.style.color,
            text_size: self.style.size,
            font: self.style.font,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::measure::ApproxMeasure;

    fn placed(position: Vec2, scale: f32, rotation: f32) -> TextProperties {
        let mut tp = TextProperties::new("Caption", TextStyle::with_size(20.0));
        tp.position = position;
        tp.scale_factor = scale;
        tp.rotation_degrees = rotation;
        tp.rebuild(&ApproxMeasure);
        tp
    }

    #[test]
    fn test_unscaled_unrotated_matrix_is_a_translation() {
        let tp = placed(Vec2::new(100.0, 40.0), 1.0, 0.0);
        let origin = tp.matrix().map_point(Vec2::ZERO);
        assert!((origin - Vec2::new(100.0, 40.0)).length() < 1e-4);
    }

    #[test]
    fn test_inverse_map_round_trip() {
        let tp = placed(Vec2::new(220.0, 180.0), 1.8, 37.0);
        for p in [
            Vec2::ZERO,
            Vec2::new(15.0, -9.0),
            tp.bounding_box().center(),
        ] {
            let mapped = tp.matrix().map_point(p);
            let back = tp.inverse_map(mapped).unwrap();
            assert!((back - p).length() < 1e-3);
        }
    }

    #[test]
    fn test_hit_test_follows_rotation() {
        let tp = placed(Vec2::new(200.0, 200.0), 1.0, 90.0);
        let center = tp.matrix().map_point(tp.bounding_box().center());
        assert!(tp.hit_test(center));

        // The box is much wider than tall; after a quarter turn a point far to
        // the side of the center is outside, one far above/below is inside.
        let half_width = tp.bounding_box().width() * 0.45;
        assert!(!tp.hit_test(center + Vec2::new(half_width, 0.0)));
        assert!(tp.hit_test(center + Vec2::new(0.0, half_width)));
    }

    #[test]
    fn test_zero_scale_never_hits() {
        let tp = placed(Vec2::new(10.0, 10.0), 0.0, 0.0);
        assert!(tp.inverse_map(Vec2::new(10.0, 10.0)).is_none());
        assert!(!tp.hit_test(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn test_rebuild_does_not_accumulate() {
        let mut tp = placed(Vec2::new(50.0, 60.0), 1.5, 12.0);
        let first = *tp.matrix();
        tp.rebuild(&ApproxMeasure);
        tp.rebuild(&ApproxMeasure);
        assert_eq!(first, *tp.matrix());
    }

    #[test]
    fn test_to_entry_normalizes_position() {
        let tp = placed(Vec2::new(250.0, 100.0), 1.0, 0.0);
        let entry = tp.to_entry(Vec2::new(500.0, 400.0));
        assert_eq!(entry.content, "Caption");
        assert!((entry.position - Vec2::new(0.5, 0.25)).length() < 1e-6);
        assert_eq!(entry.text_size, 20.0);
    }
}
