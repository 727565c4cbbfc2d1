use std::sync::Arc;

use anyhow::Context;

use crate::foundation::error::{WheelError, WheelResult};
use crate::foundation::math::premultiply_rgba8_in_place;

/// Longest edge, in pixels, used when rasterizing an SVG asset.
const SVG_RASTER_EDGE_PX: f32 = 128.0;

/// Built-in pointer icon, drawn pointing down at the wheel rim.
pub(crate) const DEFAULT_POINTER_SVG: &str = include_str!("pointer.svg");

#[derive(Clone, Debug, PartialEq, Eq)]
/// Decoded raster image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    /// Wrap straight-alpha RGBA8 pixels, premultiplying them.
    pub fn from_straight_rgba8(width: u32, height: u32, mut rgba: Vec<u8>) -> WheelResult<Self> {
        if width == 0 || height == 0 {
            return Err(WheelError::asset_load("image has zero width or height"));
        }
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return Err(WheelError::asset_load("image byte length mismatch"));
        }
        premultiply_rgba8_in_place(&mut rgba);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba),
        })
    }
}

/// Decode encoded image bytes (raster or SVG) into premultiplied RGBA8.
pub(crate) fn decode_any(bytes: &[u8]) -> WheelResult<PreparedImage> {
    if looks_like_svg(bytes) {
        let tree = parse_svg(bytes)?;
        rasterize_svg(&tree)
    } else {
        decode_image(bytes)
    }
}

/// Decode raster image bytes with the `image` crate.
pub(crate) fn decode_image(bytes: &[u8]) -> WheelResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes)
        .context("decode image from memory")
        .map_err(|e| WheelError::asset_load(format!("{e:#}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    PreparedImage::from_straight_rgba8(width, height, rgba.into_raw())
}

pub(crate) fn parse_svg(bytes: &[u8]) -> WheelResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts)
        .context("parse svg tree")
        .map_err(|e| WheelError::asset_load(format!("{e:#}")))
}

/// Rasterize an SVG so its longest edge is [`SVG_RASTER_EDGE_PX`].
pub(crate) fn rasterize_svg(tree: &usvg::Tree) -> WheelResult<PreparedImage> {
    let size = tree.size();
    let (sw, sh) = (size.width(), size.height());
    if !sw.is_finite() || !sh.is_finite() || sw <= 0.0 || sh <= 0.0 {
        return Err(WheelError::asset_load("svg has invalid width/height"));
    }
    let scale = SVG_RASTER_EDGE_PX / sw.max(sh);
    let width = ((sw * scale).ceil() as u32).max(1);
    let height = ((sh * scale).ceil() as u32).max(1);

    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| WheelError::asset_load("failed to allocate svg pixmap"))?;
    let xform = resvg::tiny_skia::Transform::from_scale(
        width as f32 / sw,
        height as f32 / sh,
    );
    resvg::render(tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied.
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixmap.take()),
    })
}

/// The built-in pointer icon.
pub(crate) fn default_pointer() -> WheelResult<PreparedImage> {
    let tree = parse_svg(DEFAULT_POINTER_SVG.as_bytes())?;
    rasterize_svg(&tree)
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(512)]);
    let text = head.trim_start_matches('\u{feff}').trim_start();
    text.starts_with("<svg") || (text.starts_with("<?xml") && text.contains("<svg"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
