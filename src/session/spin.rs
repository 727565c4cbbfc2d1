use crate::animation::schedule::{AnimationPlan, plan_with};
use crate::assets::loader::{AssetLoader, AssetRef, load_avatar_and_pointer};
use crate::encode::gif::{GifOpts, GifSink};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{WheelError, WheelResult};
use crate::render::backend::FrameRGBA;
use crate::render::cpu::WheelRenderer;
use crate::scene::request::{SpinOpts, SpinRequest};
use crate::wheel::order::{Candidate, OrderedWheel, order};

/// Frame counts from a [`SpinSession::render_to_sink`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SpinStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames actually rasterized.
    pub frames_rendered: u64,
    /// Frames reused from the previous identical angle (the hold phase).
    pub frames_reused: u64,
}

/// Owns the whole pipeline for one spin: ordered wheel, rotation plan and renderer.
///
/// Construction orders the candidates, plans the rotation and loads both images concurrently;
/// nothing is rendered until frames are requested.
pub struct SpinSession {
    plan: AnimationPlan,
    renderer: WheelRenderer,
    encode: GifOpts,
}

impl SpinSession {
    /// Prepare a session for `req`, fetching images through `loader`.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(candidates = req.candidates.len(), selected = req.selected_index)
    )]
    pub fn new(req: &SpinRequest, loader: &dyn AssetLoader) -> WheelResult<Self> {
        Self::build(req, loader).inspect_err(|e| tracing::error!(error = %e, "spin setup failed"))
    }

    fn build(req: &SpinRequest, loader: &dyn AssetLoader) -> WheelResult<Self> {
        let opts = &req.options;
        opts.validate()?;

        let wheel = order(&req.candidates, req.selected_index)?;
        let plan = plan_with(
            &opts.schedule,
            wheel.segment_count(),
            wheel.terminal_segment_index(),
        )?;
        let (avatar, pointer) =
            load_avatar_and_pointer(loader, &req.avatar, req.pointer.as_ref())?;
        let renderer = WheelRenderer::new(
            wheel,
            opts.geometry,
            opts.render.clone(),
            &avatar,
            &pointer,
        )?;

        Ok(Self {
            plan,
            renderer,
            encode: opts.encode.clone(),
        })
    }

    /// The rotation plan.
    pub fn plan(&self) -> &AnimationPlan {
        &self.plan
    }

    /// Candidates in draw order.
    pub fn wheel(&self) -> &OrderedWheel {
        self.renderer.wheel()
    }

    /// Total frames in presentation order, hold frames included.
    pub fn frame_count(&self) -> usize {
        self.plan.len()
    }

    /// Render frame `idx` of the presentation sequence.
    pub fn render_frame(&mut self, idx: FrameIndex) -> WheelResult<FrameRGBA> {
        let angle = usize::try_from(idx.0)
            .ok()
            .and_then(|i| self.plan.angle_at(i))
            .ok_or_else(|| {
                WheelError::validation(format!(
                    "frame {} is out of range for {} frames",
                    idx.0,
                    self.plan.len()
                ))
            })?;
        self.renderer.render(angle)
    }

    /// Render every frame in order into `sink`, reusing the last frame while the angle repeats.
    pub fn render_to_sink(&mut self, sink: &mut dyn FrameSink) -> WheelResult<SpinStats> {
        self.stream(sink)
            .inspect_err(|e| tracing::error!(error = %e, "spin render failed"))
    }

    /// Render every frame and encode them as one GIF.
    pub fn render_gif(&mut self) -> WheelResult<Vec<u8>> {
        let mut sink = GifSink::new(self.encode.clone())?;
        self.render_to_sink(&mut sink)?;
        sink.finish()
    }

    #[tracing::instrument(level = "debug", skip_all, fields(frames = self.plan.len()))]
    fn stream(&mut self, sink: &mut dyn FrameSink) -> WheelResult<SpinStats> {
        let side = self.renderer.geometry().canvas_size;
        sink.begin(SinkConfig {
            width: side,
            height: side,
        })?;

        let mut stats = SpinStats::default();
        let mut last: Option<(u64, FrameRGBA)> = None;
        for (i, angle) in self.plan.iter().enumerate() {
            let frame = match last.take() {
                Some((bits, frame)) if bits == angle.to_bits() => {
                    stats.frames_reused += 1;
                    frame
                }
                _ => {
                    stats.frames_rendered += 1;
                    self.renderer.render(angle)?
                }
            };
            sink.push_frame(FrameIndex(i as u64), &frame)?;
            stats.frames_total += 1;
            last = Some((angle.to_bits(), frame));
        }

        sink.end()?;
        tracing::debug!(
            rendered = stats.frames_rendered,
            reused = stats.frames_reused,
            "spin rendered"
        );
        Ok(stats)
    }
}

/// Order, plan, render and encode one spin in a single call.
pub fn render_wheel_gif(
    candidates: &[Candidate],
    selected_index: usize,
    avatar: AssetRef,
    loader: &dyn AssetLoader,
    opts: &SpinOpts,
) -> WheelResult<Vec<u8>> {
    let req = SpinRequest {
        candidates: candidates.to_vec(),
        selected_index,
        avatar,
        pointer: None,
        options: opts.clone(),
    };
    SpinSession::new(&req, loader)?.render_gif()
}

#[cfg(test)]
#[path = "../../tests/unit/session/spin.rs"]
mod tests;
