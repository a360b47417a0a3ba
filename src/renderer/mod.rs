//! Rendering module
//!
//! Immediate-mode 2D drawing onto two stacked layers (background clouds,
//! foreground entities) through the `DrawSurface` trait.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;
pub mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::render;
pub use surface::{DrawCommand, DrawSurface, Rect, RecordingSurface};
