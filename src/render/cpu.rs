use std::collections::HashMap;
use std::f64::consts::{FRAC_PI_2, PI};
use std::path::PathBuf;

use kurbo::Shape;

use crate::assets::decode::PreparedImage;
use crate::assets::fonts::{LabelFont, TextLayoutEngine, resolve_label_font};
use crate::foundation::core::{Affine, BezPath, Point, Rgb8};
use crate::foundation::error::{WheelError, WheelResult};
use crate::render::backend::FrameRGBA;
use crate::render::label::{ShapedLabel, font_size_px, shape_label, wrap_label};
use crate::render::paint::{
    ImagePaint, affine_to_cpu, bezpath_to_cpu, color, image_paint, radial_disc_image,
    stroke_outline,
};
use crate::wheel::geometry::{WheelGeometry, segment_span};
use crate::wheel::order::OrderedWheel;

const TOLERANCE: f64 = 0.05;
const POINTER_SIZE: f64 = 40.0;
const POINTER_LIFT: f64 = 30.0;
const DARK_EDGE: [u8; 4] = [0x33, 0x33, 0x33, 255];
const WEDGE_BORDER: [u8; 4] = [255, 255, 255, 150];
const LABEL_SHADOW: [u8; 4] = [0, 0, 0, 140];
const LABEL_SHADOW_OFFSET: f64 = 1.5;

/// How the center avatar behaves while the wheel turns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvatarPolicy {
    /// The avatar turns with the wheel.
    #[default]
    CoRotating,
    /// The avatar stays upright.
    Fixed,
}

/// Cosmetic rendering options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    /// Avatar rotation policy.
    pub avatar_policy: AvatarPolicy,
    /// Gap between the hub edge and the avatar clip circle, in pixels.
    pub avatar_margin: f64,
    /// Lightening applied to the hub end of each segment gradient, in percent.
    pub shading_percent: i32,
    /// Labels whose first two words are longer than this wrap onto two lines.
    pub label_wrap_chars: usize,
    /// Label text color.
    pub label_color: Rgb8,
    /// Extra directory searched for `.ttf`/`.otf`/`.ttc` label fonts before system fonts.
    pub font_dir: Option<PathBuf>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            avatar_policy: AvatarPolicy::CoRotating,
            avatar_margin: 5.0,
            shading_percent: 30,
            label_wrap_chars: 12,
            label_color: Rgb8::new(255, 255, 255),
            font_dir: None,
        }
    }
}

impl RenderOpts {
    fn validate(&self, geometry: &WheelGeometry) -> WheelResult<()> {
        if !self.avatar_margin.is_finite() || self.avatar_margin < 0.0 {
            return Err(WheelError::validation("avatar_margin must be finite and >= 0"));
        }
        if self.avatar_margin >= geometry.center_radius {
            return Err(WheelError::validation(format!(
                "avatar_margin must be smaller than center_radius ({})",
                geometry.center_radius
            )));
        }
        if self.label_wrap_chars == 0 {
            return Err(WheelError::validation("label_wrap_chars must be >= 1"));
        }
        Ok(())
    }
}

/// Draws wheel frames into one owned, reused surface.
///
/// Everything that does not depend on the rotation (gradient images, decoded assets, shaped
/// labels) is prepared once in [`WheelRenderer::new`]. [`WheelRenderer::render`] clears and
/// redraws the whole surface, so identical angles give identical pixels.
pub struct WheelRenderer {
    wheel: OrderedWheel,
    geometry: WheelGeometry,
    opts: RenderOpts,
    ctx: Option<vello_cpu::RenderContext>,
    target: vello_cpu::Pixmap,
    backdrop: vello_cpu::Image,
    hub: vello_cpu::Image,
    segment_fills: Vec<vello_cpu::Image>,
    avatar: ImagePaint,
    pointer: ImagePaint,
    font: Option<vello_cpu::peniko::FontData>,
    labels: Vec<ShapedLabel>,
}

impl WheelRenderer {
    /// Prepare a renderer for `wheel`, resolving the label font from `opts.font_dir` and the
    /// system fonts.
    ///
    /// Missing fonts are not an error: labels are skipped with a warning.
    pub fn new(
        wheel: OrderedWheel,
        geometry: WheelGeometry,
        opts: RenderOpts,
        avatar: &PreparedImage,
        pointer: &PreparedImage,
    ) -> WheelResult<Self> {
        let font = resolve_label_font(opts.font_dir.as_deref());
        Self::with_font(wheel, geometry, opts, avatar, pointer, font)
    }

    #[tracing::instrument(level = "debug", skip_all, fields(segments = wheel.segment_count()))]
    pub(crate) fn with_font(
        wheel: OrderedWheel,
        geometry: WheelGeometry,
        opts: RenderOpts,
        avatar: &PreparedImage,
        pointer: &PreparedImage,
        font: Option<LabelFont>,
    ) -> WheelResult<Self> {
        geometry.validate()?;
        opts.validate(&geometry)?;

        let side: u16 = geometry
            .canvas_size
            .try_into()
            .map_err(|_| WheelError::validation("canvas_size exceeds u16"))?;
        let r = geometry.wheel_radius;

        let backdrop = radial_disc_image([255, 255, 255, 255], [0xe4, 0xe4, 0xe4, 255], r)?;
        let hub = radial_disc_image(
            [255, 255, 255, 255],
            [0xd9, 0xd9, 0xd9, 255],
            geometry.center_radius,
        )?;

        let mut by_color = HashMap::<Rgb8, vello_cpu::Image>::new();
        let mut segment_fills = Vec::with_capacity(wheel.segment_count());
        for c in wheel.candidates() {
            let img = match by_color.get(&c.color) {
                Some(img) => img.clone(),
                None => {
                    let img = radial_disc_image(
                        c.color.shade(opts.shading_percent).with_alpha(255),
                        c.color.with_alpha(255),
                        r,
                    )?;
                    by_color.insert(c.color, img.clone());
                    img
                }
            };
            segment_fills.push(img);
        }

        let (font, labels) = match font {
            Some(font) => {
                let labels = shape_labels(&wheel, &geometry, &opts, &font)?;
                let data = vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.data.as_ref().clone()),
                    font.index,
                );
                (Some(data), labels)
            }
            None => {
                tracing::warn!("no usable font found; segment labels will not be drawn");
                (None, Vec::new())
            }
        };

        Ok(Self {
            wheel,
            geometry,
            opts,
            ctx: None,
            target: vello_cpu::Pixmap::new(side, side),
            backdrop,
            hub,
            segment_fills,
            avatar: image_paint(avatar)?,
            pointer: image_paint(pointer)?,
            font,
            labels,
        })
    }

    /// The wheel being drawn.
    pub fn wheel(&self) -> &OrderedWheel {
        &self.wheel
    }

    /// Canvas and wheel dimensions.
    pub fn geometry(&self) -> &WheelGeometry {
        &self.geometry
    }

    /// Whether segment labels are drawn (a label font was found).
    pub fn draws_labels(&self) -> bool {
        self.font.is_some()
    }

    /// Draw the wheel rotated by `angle` radians (clockwise on screen).
    pub fn render(&mut self, angle: f64) -> WheelResult<FrameRGBA> {
        if !angle.is_finite() {
            return Err(WheelError::validation(format!(
                "rotation angle must be finite, got {angle}"
            )));
        }
        let side = self.target.width();
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == side && ctx.height() == side => ctx,
            _ => vello_cpu::RenderContext::new(side, side),
        };
        ctx.reset();

        self.draw_backdrop(&mut ctx);
        self.draw_segments(&mut ctx, angle);
        self.draw_labels(&mut ctx, angle);
        self.draw_ring(&mut ctx);
        self.draw_hub(&mut ctx);
        self.draw_avatar(&mut ctx, angle);
        self.draw_pointer(&mut ctx);

        ctx.flush();
        self.target.data_as_u8_slice_mut().fill(0);
        ctx.render_to_pixmap(&mut self.target);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: u32::from(side),
            height: u32::from(side),
            data: self.target.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }

    fn draw_backdrop(&self, ctx: &mut vello_cpu::RenderContext) {
        let c = self.geometry.center();
        let r = self.geometry.wheel_radius;
        fill_disc_image(ctx, &self.backdrop, c, r);
        let rim = kurbo::Circle::new(c, r).to_path(TOLERANCE);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color(DARK_EDGE));
        ctx.fill_path(&stroke_outline(&rim, 2.0));
    }

    fn draw_segments(&self, ctx: &mut vello_cpu::RenderContext, angle: f64) {
        let c = self.geometry.center();
        let r = self.geometry.wheel_radius;
        let n = self.wheel.segment_count();
        let s = segment_span(n);

        for (i, fill) in self.segment_fills.iter().enumerate() {
            let local = if n == 1 {
                kurbo::Circle::new((r, r), r).to_path(TOLERANCE)
            } else {
                wedge_path(Point::new(r, r), r, screen_angle(i as f64 * s + angle), s)
            };

            ctx.set_transform(affine_to_cpu(Affine::translate((c.x - r, c.y - r))));
            ctx.set_paint(fill.clone());
            ctx.fill_path(&bezpath_to_cpu(&local));

            ctx.set_paint(color(WEDGE_BORDER));
            ctx.fill_path(&stroke_outline(&local, 2.0));
        }
    }

    fn draw_labels(&self, ctx: &mut vello_cpu::RenderContext, angle: f64) {
        let Some(font) = &self.font else {
            return;
        };
        let c = self.geometry.center();
        let s = segment_span(self.wheel.segment_count());
        let text_color = self.opts.label_color.with_alpha(255);

        for (i, label) in self.labels.iter().enumerate() {
            if label.glyphs.is_empty() {
                continue;
            }
            let mid = screen_angle((i as f64 + 0.5) * s + angle);
            let mut place = Affine::translate(c.to_vec2())
                * Affine::rotate(mid)
                * Affine::translate((self.geometry.label_radius(), 0.0));
            // Keep text on the left half of the wheel reading left to right.
            if mid.cos() < 0.0 {
                place *= Affine::rotate(PI);
            }

            let passes = [
                (
                    Affine::translate((LABEL_SHADOW_OFFSET, LABEL_SHADOW_OFFSET)) * place,
                    LABEL_SHADOW,
                ),
                (place, text_color),
            ];
            for (xf, rgba) in passes {
                ctx.set_transform(affine_to_cpu(xf));
                ctx.set_paint(color(rgba));
                ctx.glyph_run(font)
                    .font_size(label.size_px)
                    .fill_glyphs(label.glyphs.iter().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    }));
            }
        }
    }

    fn draw_ring(&self, ctx: &mut vello_cpu::RenderContext) {
        let c = self.geometry.center();
        let r = self.geometry.wheel_radius;
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let glow = kurbo::Circle::new(c, r - 3.0).to_path(TOLERANCE);
        ctx.set_paint(color([255, 255, 255, 90]));
        ctx.fill_path(&stroke_outline(&glow, 6.0));

        let edge = kurbo::Circle::new(c, r).to_path(TOLERANCE);
        ctx.set_paint(color(DARK_EDGE));
        ctx.fill_path(&stroke_outline(&edge, 1.5));
    }

    fn draw_hub(&self, ctx: &mut vello_cpu::RenderContext) {
        let c = self.geometry.center();
        let r = self.geometry.center_radius;
        fill_disc_image(ctx, &self.hub, c, r);
        let rim = kurbo::Circle::new(c, r).to_path(TOLERANCE);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color(DARK_EDGE));
        ctx.fill_path(&stroke_outline(&rim, 3.0));
    }

    fn draw_avatar(&self, ctx: &mut vello_cpu::RenderContext, angle: f64) {
        let clip_r = self.geometry.center_radius - self.opts.avatar_margin;
        let (w, h) = (f64::from(self.avatar.w), f64::from(self.avatar.h));
        let spin = match self.opts.avatar_policy {
            AvatarPolicy::CoRotating => Affine::rotate(angle),
            AvatarPolicy::Fixed => Affine::IDENTITY,
        };
        // Stretch the image over the clip circle's bounding square, as a canvas drawImage would.
        let xf = Affine::translate(self.geometry.center().to_vec2())
            * spin
            * Affine::scale_non_uniform(2.0 * clip_r / w, 2.0 * clip_r / h)
            * Affine::translate((-w / 2.0, -h / 2.0));
        let clip = kurbo::Ellipse::new((w / 2.0, h / 2.0), (w / 2.0, h / 2.0), 0.0)
            .to_path(TOLERANCE);

        ctx.set_transform(affine_to_cpu(xf));
        ctx.set_paint(self.avatar.paint.clone());
        ctx.fill_path(&bezpath_to_cpu(&clip));
    }

    fn draw_pointer(&self, ctx: &mut vello_cpu::RenderContext) {
        let c = self.geometry.center();
        let (w, h) = (f64::from(self.pointer.w), f64::from(self.pointer.h));
        let xf = Affine::translate((
            c.x - POINTER_SIZE / 2.0,
            c.y - self.geometry.wheel_radius - POINTER_LIFT,
        )) * Affine::scale_non_uniform(POINTER_SIZE / w, POINTER_SIZE / h);

        ctx.set_transform(affine_to_cpu(xf));
        ctx.set_paint(self.pointer.paint.clone());
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, w, h));
    }
}

/// Render a single frame with a throwaway [`WheelRenderer`].
pub fn render_frame(
    wheel: &OrderedWheel,
    geometry: &WheelGeometry,
    angle: f64,
    avatar: &PreparedImage,
    pointer: &PreparedImage,
    opts: &RenderOpts,
) -> WheelResult<FrameRGBA> {
    let mut renderer =
        WheelRenderer::new(wheel.clone(), *geometry, opts.clone(), avatar, pointer)?;
    renderer.render(angle)
}

/// Map a wheel-local angle (0 at the pointer, clockwise) onto a screen angle (0 along +x).
fn screen_angle(local: f64) -> f64 {
    local - FRAC_PI_2
}

/// Pie wedge from `start` sweeping `sweep` radians clockwise on a y-down canvas.
fn wedge_path(center: Point, radius: f64, start: f64, sweep: f64) -> BezPath {
    let mut path = BezPath::new();
    path.move_to(center);
    path.line_to(center + kurbo::Vec2::from_angle(start) * radius);
    let arc = kurbo::Arc {
        center,
        radii: kurbo::Vec2::new(radius, radius),
        start_angle: start,
        sweep_angle: sweep,
        x_rotation: 0.0,
    };
    arc.append_iter(TOLERANCE).for_each(|el| path.push(el));
    path.close_path();
    path
}

/// Fill a circle of `radius` at `center` with a disc image laid out by `radial_disc_image`.
fn fill_disc_image(
    ctx: &mut vello_cpu::RenderContext,
    img: &vello_cpu::Image,
    center: Point,
    radius: f64,
) {
    let local = kurbo::Circle::new((radius, radius), radius).to_path(TOLERANCE);
    ctx.set_transform(affine_to_cpu(Affine::translate((
        center.x - radius,
        center.y - radius,
    ))));
    ctx.set_paint(img.clone());
    ctx.fill_path(&bezpath_to_cpu(&local));
}

fn shape_labels(
    wheel: &OrderedWheel,
    geometry: &WheelGeometry,
    opts: &RenderOpts,
    font: &LabelFont,
) -> WheelResult<Vec<ShapedLabel>> {
    let mut engine = TextLayoutEngine::new(font)?;
    let size_px = font_size_px(
        geometry.label_radius(),
        segment_span(wheel.segment_count()),
    );
    wheel
        .candidates()
        .iter()
        .map(|c| {
            let lines = wrap_label(&c.label, opts.label_wrap_chars);
            shape_label(&mut engine, &lines, size_px)
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
