//! Text measurement seam between the overlay and whatever draws the glyphs.

use super::style::{FontChoice, TextStyle};
use crate::geometry::BoundingBox;

/// Measures the glyph box of a text run relative to the renderer's drawing origin.
///
/// The returned box is in unscaled, unrotated local space: drawing `content`
/// at `(0, 0)` with `style` covers exactly this box.
pub trait TextMeasure: Send + Sync {
    fn measure(&self, content: &str, style: &TextStyle) -> BoundingBox;
}

/// Estimates glyph boxes from character count and text size, with a
/// baseline-relative origin (ascent above zero, descent below).
///
/// Used before a real font backend is available and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasure;

impl ApproxMeasure {
    const PROPORTIONAL_ADVANCE: f32 = 0.5;
    const MONOSPACE_ADVANCE: f32 = 0.6;
    const ASCENT: f32 = 0.75;
    const DESCENT: f32 = 0.25;
}

impl TextMeasure for ApproxMeasure {
    fn measure(&self, content: &str, style: &TextStyle) -> BoundingBox {
        let chars = content.chars().count();
        if chars == 0 {
            return BoundingBox::EMPTY;
        }

        let advance = match style.font {
            FontChoice::Proportional => Self::PROPORTIONAL_ADVANCE,
            FontChoice::Monospace => Self::MONOSPACE_ADVANCE,
        };

        BoundingBox::new(
            0.0,
            -style.size * Self::ASCENT,
            chars as f32 * style.size * advance,
            style.size * Self::DESCENT,
        )
    }
}
