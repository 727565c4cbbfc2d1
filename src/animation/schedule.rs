use std::f64::consts::TAU;

use crate::animation::ease::Ease;
use crate::foundation::error::{WheelError, WheelResult};
use crate::foundation::math::unit_from_seed;
use crate::wheel::geometry::segment_span;

/// Share of a segment's half-width a jittered landing may use on either side of its center.
const JITTER_SPAN: f64 = 0.8;

/// Where inside the terminal segment the pointer comes to rest.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landing {
    /// Exactly on the segment's angular center.
    #[default]
    Center,
    /// A seeded offset from the center, bounded to `±0.8 · π / segment_count`.
    Jitter {
        /// Seed for the offset; equal seeds land identically.
        seed: u64,
    },
}

/// Knobs for the rotation schedule.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ScheduleOpts {
    /// Number of deceleration steps; the plan holds `frame_count + 1` spin frames.
    pub frame_count: u32,
    /// Repeats of the settled angle appended after the spin.
    pub hold_frames: u32,
    /// Whole turns before settling. Must be at least 2.
    pub full_rotations: u32,
    /// Deceleration curve.
    pub ease: Ease,
    /// Landing point inside the terminal segment.
    pub landing: Landing,
}

impl Default for ScheduleOpts {
    fn default() -> Self {
        Self {
            frame_count: 40,
            hold_frames: 10,
            full_rotations: 5,
            ease: Ease::OutQuad,
            landing: Landing::Center,
        }
    }
}

/// Per-frame wheel rotation, in radians.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct AnimationPlan {
    frames: Vec<f64>,
    hold_frames: u32,
    terminal_angle: f64,
    total_rotation: f64,
}

impl AnimationPlan {
    /// The deceleration path only, without hold repeats.
    pub fn frames(&self) -> &[f64] {
        &self.frames
    }

    /// Number of settled-angle repeats after the deceleration path.
    pub fn hold_frames(&self) -> u32 {
        self.hold_frames
    }

    /// Angle the wheel settles on.
    pub fn terminal_angle(&self) -> f64 {
        self.terminal_angle
    }

    /// Starting rotation: whole turns plus the terminal angle.
    pub fn total_rotation(&self) -> f64 {
        self.total_rotation
    }

    /// Total rendered frames including the hold phase.
    pub fn len(&self) -> usize {
        self.frames.len() + self.hold_frames as usize
    }

    /// Always `false`: a plan holds at least the settled frame.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Angle for presentation frame `idx`, hold phase included.
    pub fn angle_at(&self, idx: usize) -> Option<f64> {
        if idx < self.frames.len() {
            Some(self.frames[idx])
        } else if idx < self.len() {
            Some(self.terminal_angle)
        } else {
            None
        }
    }

    /// All angles in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames
            .iter()
            .copied()
            .chain(std::iter::repeat_n(
                self.terminal_angle,
                self.hold_frames as usize,
            ))
    }
}

/// Rotation that places the pointer inside segment `terminal_segment_index`.
///
/// The result is normalized to `[0, 2π)`.
pub fn terminal_angle(
    segment_count: usize,
    terminal_segment_index: usize,
    landing: Landing,
) -> WheelResult<f64> {
    if segment_count == 0 {
        return Err(WheelError::EmptyInput);
    }
    if terminal_segment_index >= segment_count {
        return Err(WheelError::invalid_selection(
            terminal_segment_index,
            segment_count,
        ));
    }

    let s = segment_span(segment_count);
    let offset = match landing {
        Landing::Center => 0.0,
        Landing::Jitter { seed } => (2.0 * unit_from_seed(seed) - 1.0) * (s / 2.0) * JITTER_SPAN,
    };
    // Pointer reads local angle -θ; solve -θ ≡ (k + ½)·s + offset.
    let centered = (segment_count - terminal_segment_index) as f64 * s - s / 2.0;
    Ok((centered - offset).rem_euclid(TAU))
}

/// Plan a spin with default rotations, ease and landing.
pub fn plan(
    segment_count: usize,
    terminal_segment_index: usize,
    frame_count: u32,
    hold_frames: u32,
) -> WheelResult<AnimationPlan> {
    let opts = ScheduleOpts {
        frame_count,
        hold_frames,
        ..ScheduleOpts::default()
    };
    plan_with(&opts, segment_count, terminal_segment_index)
}

/// Plan a spin that decelerates from `full_rotations` turns onto the terminal segment.
#[tracing::instrument(level = "debug", skip(opts))]
pub fn plan_with(
    opts: &ScheduleOpts,
    segment_count: usize,
    terminal_segment_index: usize,
) -> WheelResult<AnimationPlan> {
    if opts.full_rotations < 2 {
        return Err(WheelError::validation(format!(
            "full_rotations must be >= 2, got {}",
            opts.full_rotations
        )));
    }

    let terminal = terminal_angle(segment_count, terminal_segment_index, opts.landing)?;
    let total = f64::from(opts.full_rotations) * TAU + terminal;
    let travel = total - terminal;

    let frames = if opts.frame_count == 0 {
        vec![terminal]
    } else {
        let n = f64::from(opts.frame_count);
        (0..=opts.frame_count)
            .map(|i| {
                let eased = opts.ease.apply(f64::from(i) / n);
                // Written as terminal + remaining so the last step is exact.
                terminal + travel * (1.0 - eased)
            })
            .collect()
    };

    tracing::debug!(
        terminal_angle = terminal,
        total_rotation = total,
        spin_frames = frames.len(),
        hold_frames = opts.hold_frames,
        "planned rotation"
    );

    Ok(AnimationPlan {
        frames,
        hold_frames: opts.hold_frames,
        terminal_angle: terminal,
        total_rotation: total,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/animation/schedule.rs"]
mod tests;
