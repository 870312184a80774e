//! Editable, transformable text captions overlaid on an image.
//!
//! - [`geometry`], [`overlay`] and [`gestures`] hold the framework-independent
//!   core: text placement, transforms, hit-testing, selection, deletion and
//!   gesture recognition.
//! - [`view`] hosts the core in a bevy app and paints it with egui.
//! - [`ui`], [`config`] and [`paths`] make up the demo application.

pub mod config;
pub mod constants;
pub mod geometry;
pub mod gestures;
pub mod overlay;
pub mod paths;
pub mod theme;
pub mod ui;
pub mod view;

pub use overlay::{OverlayConfig, OverlayListener, TextEntry, TextOverlay};
pub use view::{OverlayWidget, TextOverlayPlugin, TextTapped, TextsChanged};
