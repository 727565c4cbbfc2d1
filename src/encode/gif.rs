use image::codecs::gif::{GifEncoder, Repeat};

use crate::foundation::core::{FrameIndex, Rgb8};
use crate::foundation::error::{WheelError, WheelResult};
use crate::foundation::math::{mul_div255_u16, unpremultiply_rgba8};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::render::backend::FrameRGBA;

/// Longest per-frame delay a GIF can carry (65535 centiseconds).
pub const MAX_DELAY_MS: u32 = 655_350;

/// Alpha at or above which a pixel is written opaque in transparent output.
const ALPHA_CUTOFF: u8 = 128;

/// GIF output options.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GifOpts {
    /// Number of times the animation repeats; `0` loops forever.
    pub loop_count: u16,
    /// Delay between frames, in milliseconds. GIF timing has centisecond resolution.
    pub delay_ms: u32,
    /// Palette quantization effort, `1..=30`; lower gives a better palette and slower encoding.
    pub quality: u8,
    /// Keep pixels with alpha below 128 transparent instead of flattening them.
    pub transparent: bool,
    /// Color composited under every pixel when `transparent` is off.
    pub background: Rgb8,
}

impl Default for GifOpts {
    fn default() -> Self {
        Self {
            loop_count: 0,
            delay_ms: 50,
            quality: 10,
            transparent: true,
            background: Rgb8::new(255, 255, 255),
        }
    }
}

impl GifOpts {
    /// Check option ranges.
    pub fn validate(&self) -> WheelResult<()> {
        if !(1..=30).contains(&self.quality) {
            return Err(WheelError::validation(format!(
                "gif quality must be in 1..=30, got {}",
                self.quality
            )));
        }
        if self.delay_ms > MAX_DELAY_MS {
            return Err(WheelError::validation(format!(
                "gif delay_ms must be <= {MAX_DELAY_MS}, got {}",
                self.delay_ms
            )));
        }
        Ok(())
    }
}

enum State {
    Idle,
    Open {
        cfg: SinkConfig,
        last_idx: Option<FrameIndex>,
        frames: Vec<image::Frame>,
    },
    Done(Vec<u8>),
}

/// Sink that collects frames and encodes them as one looping GIF.
///
/// Bytes are only available through [`GifSink::finish`] after a successful `end`; any failure
/// leaves nothing to take.
pub struct GifSink {
    opts: GifOpts,
    state: State,
}

impl GifSink {
    /// Create a sink, validating `opts`.
    pub fn new(opts: GifOpts) -> WheelResult<Self> {
        opts.validate()?;
        Ok(Self {
            opts,
            state: State::Idle,
        })
    }

    /// Consume the sink and return the encoded GIF.
    pub fn finish(self) -> WheelResult<Vec<u8>> {
        match self.state {
            State::Done(bytes) => Ok(bytes),
            State::Idle => Err(WheelError::encoding("gif sink was never started")),
            State::Open { .. } => Err(WheelError::encoding("gif sink finished before end")),
        }
    }

    fn to_gif_rgba(&self, frame: &FrameRGBA) -> Vec<u8> {
        let mut out = Vec::with_capacity(frame.data.len());
        let bg = self.opts.background;
        for px in frame.data.chunks_exact(4) {
            let straight = if frame.premultiplied {
                unpremultiply_rgba8([px[0], px[1], px[2], px[3]])
            } else {
                [px[0], px[1], px[2], px[3]]
            };
            if self.opts.transparent {
                if straight[3] < ALPHA_CUTOFF {
                    out.extend_from_slice(&[0, 0, 0, 0]);
                } else {
                    out.extend_from_slice(&[straight[0], straight[1], straight[2], 255]);
                }
            } else {
                let a = u16::from(straight[3]);
                let inv = 255 - a;
                let over = |c: u8, b: u8| -> u8 {
                    (mul_div255_u16(u16::from(c), a) + mul_div255_u16(u16::from(b), inv)).min(255)
                        as u8
                };
                out.extend_from_slice(&[
                    over(straight[0], bg.r),
                    over(straight[1], bg.g),
                    over(straight[2], bg.b),
                    255,
                ]);
            }
        }
        out
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> WheelResult<()> {
        if !matches!(self.state, State::Idle) {
            return Err(WheelError::encoding("gif sink already started"));
        }
        if cfg.width == 0 || cfg.height == 0 {
            return Err(WheelError::encoding("gif width/height must be non-zero"));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(WheelError::encoding(format!(
                "gif dimensions must fit in u16, got {}x{}",
                cfg.width, cfg.height
            )));
        }
        self.state = State::Open {
            cfg,
            last_idx: None,
            frames: Vec::new(),
        };
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> WheelResult<()> {
        let State::Open { cfg, last_idx, .. } = &self.state else {
            return Err(WheelError::encoding("gif sink is not accepting frames"));
        };
        if let Some(last) = last_idx
            && idx.0 <= last.0
        {
            return Err(WheelError::encoding(format!(
                "gif sink received out-of-order frame {} after {}",
                idx.0, last.0
            )));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(WheelError::encoding(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }
        if frame.data.len() != (frame.width as usize) * (frame.height as usize) * 4 {
            return Err(WheelError::encoding(
                "frame.data size mismatch with width*height*4",
            ));
        }

        let rgba = self.to_gif_rgba(frame);
        let buffer = image::RgbaImage::from_raw(frame.width, frame.height, rgba)
            .ok_or_else(|| WheelError::encoding("frame buffer has the wrong length"))?;
        let delay = image::Delay::from_numer_denom_ms(self.opts.delay_ms, 1);

        if let State::Open {
            last_idx, frames, ..
        } = &mut self.state
        {
            *last_idx = Some(idx);
            frames.push(image::Frame::from_parts(buffer, 0, 0, delay));
        }
        Ok(())
    }

    #[tracing::instrument(level = "debug", skip_all)]
    fn end(&mut self) -> WheelResult<()> {
        let frames = match std::mem::replace(&mut self.state, State::Idle) {
            State::Open { frames, .. } => frames,
            other => {
                self.state = other;
                return Err(WheelError::encoding("gif sink ended without begin"));
            }
        };
        if frames.is_empty() {
            return Err(WheelError::encoding("cannot encode a gif with no frames"));
        }
        let frame_count = frames.len();

        let mut bytes = Vec::new();
        {
            let mut encoder = GifEncoder::new_with_speed(&mut bytes, i32::from(self.opts.quality));
            let repeat = match self.opts.loop_count {
                0 => Repeat::Infinite,
                n => Repeat::Finite(n),
            };
            encoder
                .set_repeat(repeat)
                .map_err(|e| WheelError::encoding(format!("set gif repeat: {e}")))?;
            encoder
                .encode_frames(frames)
                .map_err(|e| WheelError::encoding(format!("encode gif frames: {e}")))?;
        }

        tracing::debug!(frames = frame_count, bytes = bytes.len(), "encoded gif");
        self.state = State::Done(bytes);
        Ok(())
    }
}

/// Encode `frames` as one looping GIF.
///
/// The canvas size is taken from the first frame; every other frame must match it.
pub fn assemble(frames: &[FrameRGBA], opts: &GifOpts) -> WheelResult<Vec<u8>> {
    let first = frames
        .first()
        .ok_or_else(|| WheelError::encoding("cannot encode a gif with no frames"))?;
    let mut sink = GifSink::new(opts.clone())?;
    sink.begin(SinkConfig {
        width: first.width,
        height: first.height,
    })?;
    for (i, frame) in frames.iter().enumerate() {
        sink.push_frame(FrameIndex(i as u64), frame)?;
    }
    sink.end()?;
    sink.finish()
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
