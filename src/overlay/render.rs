//! Render hook the overlay draws through.

use super::properties::TextProperties;
use crate::geometry::BoundingBox;

/// Drawing surface for [`TextOverlay::draw`](super::TextOverlay::draw).
///
/// Calls arrive back to front: the delete button first, then each text in
/// list order.
pub trait OverlayPainter {
    /// Draw the delete affordance filling `rect` (view pixels)
    fn draw_delete_button(&mut self, rect: BoundingBox);

    /// Draw one text through its forward matrix
    fn draw_text(&mut self, text: &TextProperties);
}
