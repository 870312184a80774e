//! Affine transform mapping local glyph space to view pixel space.
//!
//! Composition follows the canvas convention: `pre_*` operations are applied
//! to points *before* the existing transform (`M' = M * op`), so building
//! `scale -> pre_translate -> pre_rotate` yields a matrix that first rotates,
//! then translates, then scales a point.

use bevy::math::{Affine2, Vec2};

use super::BoundingBox;

/// Determinant magnitude below which the matrix is treated as singular
const SINGULAR_EPSILON: f32 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMatrix(Affine2);

impl Default for TextMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl TextMatrix {
    pub const IDENTITY: Self = Self(Affine2::IDENTITY);

    pub fn reset(&mut self) {
        self.0 = Affine2::IDENTITY;
    }

    /// Replace the matrix with a uniform scale
    pub fn set_scale(&mut self, scale: f32) {
        self.0 = Affine2::from_scale(Vec2::splat(scale));
    }

    pub fn pre_translate(&mut self, offset: Vec2) {
        self.0 = self.0 * Affine2::from_translation(offset);
    }

    /// Pre-concatenate a rotation of `degrees` (clockwise on a y-down screen) about `pivot`
    pub fn pre_rotate(&mut self, degrees: f32, pivot: Vec2) {
        let rotation = Affine2::from_translation(pivot)
            * Affine2::from_angle(degrees.to_radians())
            * Affine2::from_translation(-pivot);
        self.0 = self.0 * rotation;
    }

    pub fn map_point(&self, point: Vec2) -> Vec2 {
        self.0.transform_point2(point)
    }

    /// Map a box and return the axis-aligned box enclosing its four mapped corners
    pub fn map_rect(&self, rect: &BoundingBox) -> BoundingBox {
        let corners = rect.corners().map(|c| self.map_point(c));
        BoundingBox::enclosing(&corners)
    }

    /// The inverse transform, or `None` when the matrix is singular
    pub fn invert(&self) -> Option<TextMatrix> {
        if self.0.matrix2.determinant().abs() < SINGULAR_EPSILON {
            return None;
        }
        Some(TextMatrix(self.0.inverse()))
    }
}
