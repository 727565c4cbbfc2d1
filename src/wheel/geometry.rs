use std::f64::consts::TAU;

use crate::foundation::core::Point;
use crate::foundation::error::{WheelError, WheelResult};

/// Fixed canvas and wheel dimensions, in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct WheelGeometry {
    /// Width and height of the square canvas.
    pub canvas_size: u32,
    /// Radius of the segmented disc.
    pub wheel_radius: f64,
    /// Radius of the hub disc holding the avatar.
    pub center_radius: f64,
}

impl Default for WheelGeometry {
    fn default() -> Self {
        Self {
            canvas_size: 500,
            wheel_radius: 230.0,
            center_radius: 50.0,
        }
    }
}

impl WheelGeometry {
    /// Check `0 < center_radius < wheel_radius < canvas_size / 2` and raster limits.
    pub fn validate(&self) -> WheelResult<()> {
        if self.canvas_size == 0 || self.canvas_size > u32::from(u16::MAX) {
            return Err(WheelError::validation(format!(
                "canvas_size must be in 1..={}, got {}",
                u16::MAX,
                self.canvas_size
            )));
        }
        let half = f64::from(self.canvas_size) / 2.0;
        if !self.wheel_radius.is_finite() || self.wheel_radius <= 0.0 || self.wheel_radius >= half
        {
            return Err(WheelError::validation(format!(
                "wheel_radius must be in (0, {half}), got {}",
                self.wheel_radius
            )));
        }
        if !self.center_radius.is_finite()
            || self.center_radius <= 0.0
            || self.center_radius >= self.wheel_radius
        {
            return Err(WheelError::validation(format!(
                "center_radius must be in (0, {}), got {}",
                self.wheel_radius, self.center_radius
            )));
        }
        Ok(())
    }

    /// Canvas center in pixel coordinates.
    pub fn center(&self) -> Point {
        let c = f64::from(self.canvas_size) / 2.0;
        Point::new(c, c)
    }

    /// Radius at which segment labels are centered.
    pub fn label_radius(&self) -> f64 {
        self.wheel_radius * 2.0 / 3.0
    }
}

/// Angular width of one segment: `2π / segment_count`.
///
/// `segment_count == 0` is treated as a single full-circle segment.
pub fn segment_span(segment_count: usize) -> f64 {
    TAU / segment_count.max(1) as f64
}

/// Half-open local angular range `[start, end)` of segment `i`.
pub fn segment_range(i: usize, segment_count: usize) -> (f64, f64) {
    let s = segment_span(segment_count);
    (i as f64 * s, (i + 1) as f64 * s)
}

/// Segment whose span contains the pointer when the wheel is rotated by `angle`.
///
/// The pointer is the wheel's local zero direction, so at rotation `angle` it reads local angle
/// `-angle` (mod 2π).
pub fn segment_under_pointer(segment_count: usize, angle: f64) -> usize {
    let n = segment_count.max(1);
    let local = (-angle).rem_euclid(TAU);
    let idx = (local / segment_span(n)).floor() as usize;
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    idx.min(n - 1)
}

#[cfg(test)]
#[path = "../../tests/unit/wheel/geometry.rs"]
mod tests;
