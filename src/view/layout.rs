use bevy::math::Vec2;

use crate::geometry::BoundingBox;

/// Largest rectangle with the aspect ratio of `content` that fits inside
/// `bounds`, centered in it. Empty when either side has no area.
pub fn fit_center(content: Vec2, bounds: BoundingBox) -> BoundingBox {
    if content.x <= 0.0 || content.y <= 0.0 || bounds.is_empty() {
        return BoundingBox::EMPTY;
    }

    let scale = (bounds.width() / content.x).min(bounds.height() / content.y);
    let size = content * scale;
    let min = bounds.center() - size / 2.0;
    BoundingBox::from_corners(min, min + size)
}
