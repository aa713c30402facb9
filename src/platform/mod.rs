//! Platform abstraction layer
//!
//! Browser bindings for:
//! - The 2D canvas drawing surface
//! - Window size for the canvas
//!
//! Input events and the animation loop are wired up in `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
