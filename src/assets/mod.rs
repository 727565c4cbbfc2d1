//! Image and font inputs for the renderer.

pub(crate) mod decode;
pub(crate) mod fonts;
/// Asset references and loaders.
pub mod loader;
