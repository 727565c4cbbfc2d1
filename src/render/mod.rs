//! CPU rasterization of wheel frames.

/// Frame type returned by the renderer.
pub mod backend;
/// The wheel renderer.
pub mod cpu;
pub(crate) mod label;
pub(crate) mod paint;
