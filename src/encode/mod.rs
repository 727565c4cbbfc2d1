//! Encoding sinks.
//!
//! Sinks consume rendered frames in presentation order and are driven by
//! [`crate::SpinSession::render_to_sink`].

/// Animated GIF output.
pub mod gif;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
