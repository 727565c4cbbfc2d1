use std::sync::Arc;

use crate::assets::decode::PreparedImage;
use crate::foundation::core::{Affine, BezPath};
use crate::foundation::error::{WheelError, WheelResult};
use crate::foundation::math::premultiply_rgba8_in_place;

#[derive(Clone)]
pub(crate) struct ImagePaint {
    pub(crate) paint: vello_cpu::Image,
    pub(crate) w: u32,
    pub(crate) h: u32,
}

pub(crate) fn color(rgba: [u8; 4]) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(rgba[0], rgba[1], rgba[2], rgba[3])
}

pub(crate) fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

pub(crate) fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

/// Outline of `path` stroked at `width`, ready to be filled.
pub(crate) fn stroke_outline(path: &BezPath, width: f64) -> vello_cpu::kurbo::BezPath {
    let outline = kurbo::stroke(
        path.elements().iter().copied(),
        &kurbo::Stroke::new(width),
        &kurbo::StrokeOpts::default(),
        0.05,
    );
    bezpath_to_cpu(&outline)
}

pub(crate) fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> WheelResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| WheelError::validation("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| WheelError::validation("pixmap height exceeds u16"))?;
    if bytes.len()
        != (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4)
    {
        return Err(WheelError::validation("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
        .collect::<Vec<_>>();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels, w, h, true,
    ))
}

fn image_from_premul_bytes(bytes: &[u8], w: u32, h: u32) -> WheelResult<vello_cpu::Image> {
    let pixmap = pixmap_from_premul_bytes(bytes, w, h)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

pub(crate) fn image_paint(img: &PreparedImage) -> WheelResult<ImagePaint> {
    Ok(ImagePaint {
        paint: image_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?,
        w: img.width,
        h: img.height,
    })
}

/// Square image of a disc of `radius` whose color runs from `inner` at the center to `outer`
/// at the rim. Pixels beyond the rim keep `outer`; callers clip with their own path.
///
/// The disc center sits at `(radius, radius)` in image space.
pub(crate) fn radial_disc_image(
    inner: [u8; 4],
    outer: [u8; 4],
    radius: f64,
) -> WheelResult<vello_cpu::Image> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err(WheelError::validation("gradient radius must be finite and > 0"));
    }
    let side = (radius * 2.0).ceil() as u32;
    let mut bytes = vec![0u8; (side as usize).saturating_mul(side as usize).saturating_mul(4)];
    for y in 0..side {
        for x in 0..side {
            let dx = f64::from(x) + 0.5 - radius;
            let dy = f64::from(y) + 0.5 - radius;
            let t = ((dx * dx + dy * dy).sqrt() / radius).min(1.0);
            let lerp = |a: u8, b: u8| -> u8 {
                let (af, bf) = (f64::from(a), f64::from(b));
                (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
            };
            let idx = ((y as usize) * (side as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&[
                lerp(inner[0], outer[0]),
                lerp(inner[1], outer[1]),
                lerp(inner[2], outer[2]),
                lerp(inner[3], outer[3]),
            ]);
        }
    }
    premultiply_rgba8_in_place(&mut bytes);
    image_from_premul_bytes(&bytes, side, side)
}

#[cfg(test)]
#[path = "../../tests/unit/render/paint.rs"]
mod tests;
