use smallvec::SmallVec;

use crate::assets::fonts::{TextBrushRgba8, TextLayoutEngine};
use crate::foundation::error::WheelResult;

pub(crate) const MIN_FONT_PX: f32 = 9.0;
pub(crate) const MAX_FONT_PX: f32 = 20.0;
const LINE_HEIGHT: f32 = 1.15;

/// Split `label` after its first word when the first two words exceed `max_chars`.
pub(crate) fn wrap_label(label: &str, max_chars: usize) -> SmallVec<[String; 2]> {
    let mut words = label.split_whitespace();
    let (Some(first), Some(second)) = (words.next(), words.next()) else {
        return SmallVec::from_iter([label.trim().to_string()]);
    };
    if first.chars().count() + 1 + second.chars().count() <= max_chars {
        return SmallVec::from_iter([label.trim().to_string()]);
    }
    let rest = std::iter::once(second)
        .chain(words)
        .collect::<Vec<_>>()
        .join(" ");
    SmallVec::from_iter([first.to_string(), rest])
}

/// Font size for a label at `label_radius` inside a wedge of `span` radians.
pub(crate) fn font_size_px(label_radius: f64, span: f64) -> f32 {
    let arc = (label_radius * span.min(std::f64::consts::PI)) as f32;
    (arc * 0.42).clamp(MIN_FONT_PX, MAX_FONT_PX)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct PlacedGlyph {
    pub(crate) id: u32,
    pub(crate) x: f32,
    pub(crate) y: f32,
}

/// Glyphs of one label, centered on the origin with text running along +x.
#[derive(Clone, Debug, Default)]
pub(crate) struct ShapedLabel {
    pub(crate) size_px: f32,
    pub(crate) glyphs: Vec<PlacedGlyph>,
}

pub(crate) fn shape_label(
    engine: &mut TextLayoutEngine,
    lines: &[String],
    size_px: f32,
) -> WheelResult<ShapedLabel> {
    let brush = TextBrushRgba8 {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
    let line_h = size_px * LINE_HEIGHT;
    let first_offset = -(lines.len().saturating_sub(1) as f32) * line_h / 2.0;
    // Baselines sit a third of the em below the line center.
    let optical = size_px * 0.35;

    let mut glyphs = Vec::new();
    for (i, text) in lines.iter().enumerate() {
        let layout = engine.layout_line(text, size_px, brush)?;
        let dx = -layout.width() / 2.0;
        let dy = first_offset + (i as f32) * line_h + optical;
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let baseline = run.baseline();
                glyphs.extend(run.positioned_glyphs().map(|g| PlacedGlyph {
                    id: g.id,
                    x: g.x + dx,
                    y: g.y - baseline + dy,
                }));
            }
        }
    }
    Ok(ShapedLabel { size_px, glyphs })
}

#[cfg(test)]
#[path = "../../tests/unit/render/label.rs"]
mod tests;
