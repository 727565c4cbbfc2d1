//! Wheel content and geometry: candidate ordering and segment layout.

/// Candidates and the winner-aware reordering.
pub mod order;
/// Canvas/wheel dimensions and segment angle math.
pub mod geometry;
