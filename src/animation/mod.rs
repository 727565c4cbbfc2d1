//! Rotation trajectory for the spin.

/// Easing curves mapping normalized progress.
pub mod ease;
/// Terminal angle and per-frame rotation schedule.
pub mod schedule;
