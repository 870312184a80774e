//! Framework-independent text overlay core.
//!
//! ## Module Structure
//!
//! - [`config`] - construction-time gesture switches and size limits
//! - [`entry`] - host-facing [`TextEntry`] snapshots and position normalization
//! - [`style`] - render style (color, size, font, drop shadow)
//! - [`measure`] - [`TextMeasure`] seam for glyph box measurement
//! - [`properties`] - per-text working state, forward matrix and hit-testing
//! - [`delete_zone`] - delete button geometry and its scale animation
//! - [`listener`] - host callbacks
//! - [`render`] - [`OverlayPainter`] render hook
//! - [`widget`] - [`TextOverlay`], tying it all together
//!
//! Nothing here touches a window or a GPU; the bevy/egui glue lives in
//! [`crate::view`].

pub mod config;
pub mod delete_zone;
pub mod entry;
pub mod listener;
pub mod measure;
pub mod properties;
pub mod render;
pub mod style;
mod widget;

#[cfg(test)]
mod tests;

pub use config::{ClampMode, OverlayConfig};
pub use delete_zone::{DeleteButtonAnimator, DeleteZone};
pub use entry::TextEntry;
pub use listener::OverlayListener;
pub use measure::{ApproxMeasure, TextMeasure};
pub use properties::TextProperties;
pub use render::OverlayPainter;
pub use style::{DropShadow, FontChoice, TextStyle};
pub use widget::{Selection, TextOverlay};
