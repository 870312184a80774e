//! Framework-independent 2D geometry used by the overlay.
//!
//! - [`BoundingBox`] - axis-aligned box with the half-open `contains` rule
//!   used for hit-testing and the strict overlap rule used for the delete zone
//! - [`TextMatrix`] - affine transform with scale/pre-translate/pre-rotate
//!   composition, forward and inverse mapping

mod bounds;
mod matrix;

pub use bounds::BoundingBox;
pub use matrix::TextMatrix;
