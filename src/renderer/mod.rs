//! Canvas-style rendering module
//!
//! Draws each game mode through the [`DrawSurface`] trait so the same code
//! paints the browser canvas and headless recorders.

pub mod scene;
pub mod surface;

pub use scene::{Overlay, render};
pub use surface::{DrawCommand, DrawSurface, RecordingSurface, TextAlign};
